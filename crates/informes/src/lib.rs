//! Markdown report tree generated from the reconciled chamber data:
//! per-deputy fichas with statistics, per-acta notes, indexes, and a
//! data-quality note for unresolved vote names.

pub mod informe;

pub use informe::{InformePaths, generar};
