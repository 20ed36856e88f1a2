//! Word and PDF documents for generated lesson artifacts.
//!
//! Both formats render the same [`Block`] list built by [`compose`], so a
//! worksheet exported as DOCX and as PDF carries identical content in
//! identical order.

mod config;
mod docx;
mod errors;
mod exporter;
mod layout;
mod pdf;
mod session;
mod sink;

pub use config::{Labels, Letterhead};
pub use docx::DocxExporter;
pub use errors::*;
pub use exporter::{file_name, DocumentFormat, Exporter};
pub use layout::{compose, option_label, options_line, Align, Block, BlockKind, TWIPS_PER_POINT};
pub use pdf::{Font, Page, PageItem, PageSetup, PdfExporter, PdfFonts};
pub use session::{Notice, Session};
pub use sink::{DeliveredFile, DirectorySink, DownloadSink, MemorySink};
