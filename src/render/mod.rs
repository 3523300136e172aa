//! Rendering module: markup buffer, escaping and LaTeX serialization.

mod escape;
mod latex;
mod markup;
mod options;
mod result;

pub use escape::{escape_math, escape_text};
pub use latex::{to_latex, LatexWriter, MarkupWriter};
pub use markup::{Command, MarkupBuffer};
pub use options::{RenderOptions, MAX_FIGURE_WIDTH, MIN_FIGURE_WIDTH};
pub use result::ConversionStats;
