//! Core data layer for Argentine Chamber of Deputies roll-call data:
//! fetches the public deputies and actas datasets, deduplicates the
//! deputy registry, reconciles free-text vote names against it (slug
//! match with an alias fallback) and derives per-deputy statistics.
//! Presentation is somebody else's problem; this crate only hands over
//! plain data.

pub mod actas;
pub mod bloques;
pub mod config;
pub mod estadisticas;
pub mod fuente;
pub mod model;
pub mod names;
pub mod reconcilia;
pub mod registro;
pub mod schema;
pub mod store;

pub use config::Config;
pub use fuente::{FuenteDatos, FuenteEstatica, HttpFuente};
pub use model::{Acta, Diputado, TipoVoto, Voto};
pub use store::{ActaDetalle, Camara, FichaDiputado};
