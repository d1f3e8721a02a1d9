//! Output renderers: on-screen HTML and PDF transcripts.

mod html;
mod pdf;

pub use html::{BLANK, Branding, HtmlRenderer, Level, Message, SearchView};
pub use pdf::PdfExporter;
