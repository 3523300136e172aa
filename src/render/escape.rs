//! LaTeX escaping for text and math mode.
//!
//! Input is NFC-normalized first so that decomposed accents reach the
//! output as single precomposed characters.

use unicode_normalization::UnicodeNormalization;

/// Escape a string for use in LaTeX text mode (body text, headings, cells, captions).
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.nfc() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '%' | '&' | '_' | '#' | '{' | '}' | '$' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '<' => out.push_str("\\textless{}"),
            '>' => out.push_str("\\textgreater{}"),
            '|' => out.push_str("\\textbar{}"),
            '\u{00A0}' => out.push('~'),
            '\t' | '\n' | '\r' => out.push(' '),
            c if c.is_control() => {}
            c => match symbol(c) {
                Some(sym) => out.push_str(sym.text),
                None => out.push(c),
            },
        }
    }
    out
}

/// Escape a string for use inside a display-math environment.
///
/// Characters without a math-mode equivalent are wrapped in `\text{}`.
pub fn escape_math(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut pending_text = String::new();

    for c in text.nfc() {
        if !c.is_ascii() && c != '\u{00A0}' && symbol(c).is_none() && !c.is_control() {
            pending_text.push(c);
            continue;
        }
        flush_text(&mut out, &mut pending_text);

        match c {
            '\\' => out.push_str("\\backslash{}"),
            '%' | '&' | '_' | '#' | '{' | '}' | '$' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\sim{}"),
            '^' => out.push_str("\\hat{}"),
            '\u{00A0}' => out.push('~'),
            '\t' | '\n' | '\r' => out.push(' '),
            c if c.is_control() => {}
            c => match symbol(c) {
                Some(sym) => out.push_str(sym.math),
                None => out.push(c),
            },
        }
    }
    flush_text(&mut out, &mut pending_text);
    out
}

fn flush_text(out: &mut String, pending: &mut String) {
    if !pending.is_empty() {
        out.push_str("\\text{");
        out.push_str(pending);
        out.push('}');
        pending.clear();
    }
}

/// Replacement for a non-ASCII symbol in both modes.
#[derive(Debug, Clone, Copy)]
struct Symbol {
    text: &'static str,
    math: &'static str,
}

const fn sym(text: &'static str, math: &'static str) -> Option<Symbol> {
    Some(Symbol { text, math })
}

fn symbol(c: char) -> Option<Symbol> {
    match c {
        // Quotes and dashes
        '\u{2018}' => sym("`", "\\text{`}"),
        '\u{2019}' => sym("'", "\\text{'}"),
        '\u{201C}' => sym("``", "\\text{``}"),
        '\u{201D}' => sym("''", "\\text{''}"),
        '\u{2013}' => sym("--", "-"),
        '\u{2014}' => sym("---", "-"),
        '\u{2212}' => sym("\\textminus{}", "-"),
        '\u{2026}' => sym("\\ldots{}", "\\ldots{}"),
        '\u{2022}' => sym("\\textbullet{}", "\\bullet{}"),
        '\u{00B7}' => sym("\\textperiodcentered{}", "\\cdot{}"),

        // Currency and marks
        '\u{20AC}' => sym("\\texteuro{}", "\\text{\\texteuro{}}"),
        '\u{00A3}' => sym("\\pounds{}", "\\pounds{}"),
        '\u{00A5}' => sym("\\textyen{}", "\\text{\\textyen{}}"),
        '\u{00A2}' => sym("\\textcent{}", "\\text{\\textcent{}}"),
        '\u{00A9}' => sym("\\textcopyright{}", "\\text{\\textcopyright{}}"),
        '\u{00AE}' => sym("\\textregistered{}", "\\text{\\textregistered{}}"),
        '\u{2122}' => sym("\\texttrademark{}", "\\text{\\texttrademark{}}"),
        '\u{00A7}' => sym("\\S{}", "\\S{}"),
        '\u{00B6}' => sym("\\P{}", "\\P{}"),

        // Operators and relations
        '\u{00B0}' => sym("\\textdegree{}", "^{\\circ}"),
        '\u{00B1}' => sym("\\textpm{}", "\\pm{}"),
        '\u{00D7}' => sym("\\texttimes{}", "\\times{}"),
        '\u{00F7}' => sym("\\textdiv{}", "\\div{}"),
        '\u{00B5}' => sym("\\textmu{}", "\\mu{}"),
        '\u{2264}' => sym("\\ensuremath{\\leq}", "\\leq{}"),
        '\u{2265}' => sym("\\ensuremath{\\geq}", "\\geq{}"),
        '\u{2260}' => sym("\\ensuremath{\\neq}", "\\neq{}"),
        '\u{2248}' => sym("\\ensuremath{\\approx}", "\\approx{}"),
        '\u{2261}' => sym("\\ensuremath{\\equiv}", "\\equiv{}"),
        '\u{221D}' => sym("\\ensuremath{\\propto}", "\\propto{}"),
        '\u{221E}' => sym("\\ensuremath{\\infty}", "\\infty{}"),
        '\u{2211}' => sym("\\ensuremath{\\sum}", "\\sum{}"),
        '\u{220F}' => sym("\\ensuremath{\\prod}", "\\prod{}"),
        '\u{222B}' => sym("\\ensuremath{\\int}", "\\int{}"),
        '\u{221A}' => sym("\\ensuremath{\\surd}", "\\sqrt{}"),
        '\u{2202}' => sym("\\ensuremath{\\partial}", "\\partial{}"),
        '\u{2207}' => sym("\\ensuremath{\\nabla}", "\\nabla{}"),
        '\u{2208}' => sym("\\ensuremath{\\in}", "\\in{}"),
        '\u{22C5}' => sym("\\ensuremath{\\cdot}", "\\cdot{}"),

        // Arrows
        '\u{2190}' => sym("\\textleftarrow{}", "\\leftarrow{}"),
        '\u{2192}' => sym("\\textrightarrow{}", "\\rightarrow{}"),
        '\u{2191}' => sym("\\textuparrow{}", "\\uparrow{}"),
        '\u{2193}' => sym("\\textdownarrow{}", "\\downarrow{}"),
        '\u{2194}' => sym("\\ensuremath{\\leftrightarrow}", "\\leftrightarrow{}"),
        '\u{21D2}' => sym("\\ensuremath{\\Rightarrow}", "\\Rightarrow{}"),
        '\u{21D4}' => sym("\\ensuremath{\\Leftrightarrow}", "\\Leftrightarrow{}"),

        c => greek(c),
    }
}

fn greek(c: char) -> Option<Symbol> {
    macro_rules! letter {
        ($name:literal) => {
            sym(
                concat!("\\ensuremath{\\", $name, "}"),
                concat!("\\", $name, "{}"),
            )
        };
    }

    match c {
        'α' => letter!("alpha"),
        'β' => letter!("beta"),
        'γ' => letter!("gamma"),
        'δ' => letter!("delta"),
        'ε' => letter!("epsilon"),
        'ζ' => letter!("zeta"),
        'η' => letter!("eta"),
        'θ' => letter!("theta"),
        'ι' => letter!("iota"),
        'κ' => letter!("kappa"),
        'λ' => letter!("lambda"),
        'μ' => letter!("mu"),
        'ν' => letter!("nu"),
        'ξ' => letter!("xi"),
        'π' => letter!("pi"),
        'ρ' => letter!("rho"),
        'σ' => letter!("sigma"),
        'ς' => letter!("varsigma"),
        'τ' => letter!("tau"),
        'υ' => letter!("upsilon"),
        'φ' => letter!("phi"),
        'χ' => letter!("chi"),
        'ψ' => letter!("psi"),
        'ω' => letter!("omega"),
        'Γ' => letter!("Gamma"),
        'Δ' => letter!("Delta"),
        'Θ' => letter!("Theta"),
        'Λ' => letter!("Lambda"),
        'Ξ' => letter!("Xi"),
        'Π' => letter!("Pi"),
        'Σ' => letter!("Sigma"),
        'Υ' => letter!("Upsilon"),
        'Φ' => letter!("Phi"),
        'Ψ' => letter!("Psi"),
        'Ω' => letter!("Omega"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_specials() {
        assert_eq!(
            escape_text("50% & $100_{total}"),
            "50\\% \\& \\$100\\_\\{total\\}"
        );
        assert_eq!(escape_text("a\\b"), "a\\textbackslash{}b");
        assert_eq!(escape_text("#1 ~ ^"), "\\#1 \\textasciitilde{} \\textasciicircum{}");
        assert_eq!(escape_text("<a|b>"), "\\textless{}a\\textbar{}b\\textgreater{}");
    }

    #[test]
    fn test_escape_text_whitespace() {
        assert_eq!(escape_text("a\tb\nc"), "a b c");
        assert_eq!(escape_text("10\u{00A0}kg"), "10~kg");
        assert_eq!(escape_text("bell\u{0007}"), "bell");
    }

    #[test]
    fn test_escape_text_symbols() {
        assert_eq!(escape_text("\u{201C}hi\u{201D}"), "``hi''");
        assert_eq!(escape_text("1\u{2013}2"), "1--2");
        assert_eq!(escape_text("5 \u{00B1} 1 \u{00B0}C"), "5 \\textpm{} 1 \\textdegree{}C");
        assert_eq!(escape_text("\u{03B1}-decay"), "\\ensuremath{\\alpha}-decay");
        assert_eq!(escape_text("x \u{2264} \u{221E}"), "x \\ensuremath{\\leq} \\ensuremath{\\infty}");
    }

    #[test]
    fn test_escape_text_letters_pass_through_normalized() {
        assert_eq!(escape_text("café"), "café");
        // "e" followed by a combining acute accent composes to "é"
        assert_eq!(escape_text("cafe\u{0301}"), "caf\u{00E9}");
        assert_eq!(escape_text("Zürich 東京"), "Zürich 東京");
    }

    #[test]
    fn test_escape_math() {
        assert_eq!(escape_math("a_1 + b^2"), "a\\_1 + b\\hat{}2");
        assert_eq!(escape_math("x \\ y ~ z"), "x \\backslash{} y \\sim{} z");
        assert_eq!(escape_math("a < b | c"), "a < b | c");
        assert_eq!(escape_math("50% & $"), "50\\% \\& \\$");
    }

    #[test]
    fn test_escape_math_symbols_and_text() {
        assert_eq!(escape_math("2\u{03C0}r"), "2\\pi{}r");
        assert_eq!(escape_math("a \u{00D7} b"), "a \\times{} b");
        assert_eq!(escape_math("v = d/t (Geschwindigkeit ü)"), "v = d/t (Geschwindigkeit \\text{ü})");
        assert_eq!(escape_math("東京"), "\\text{東京}");
    }
}
