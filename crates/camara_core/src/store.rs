use serde::Serialize;
use tokio::sync::OnceCell;

use crate::actas::construir_actas;
use crate::bloques::{self, Bloques};
use crate::estadisticas::{self, Estadisticas};
use crate::fuente::FuenteDatos;
use crate::model::{Acta, Diputado};
use crate::reconcilia::{self, ActaAnotada, VotoResuelto, VotoSinResolver};
use crate::registro::construir_registro;

/// A deputy together with their full participation history and derived
/// statistics.
#[derive(Debug, Clone, Serialize)]
pub struct FichaDiputado<'a> {
    pub diputado: &'a Diputado,
    pub actas: Vec<ActaAnotada<'a>>,
    pub estadisticas: Estadisticas,
}

/// An acta with every vote resolved against the registry.
#[derive(Debug, Clone, Serialize)]
pub struct ActaDetalle<'a> {
    pub acta: &'a Acta,
    pub votos: Vec<VotoResuelto<'a>>,
}

/// Read API over the two upstream datasets, with an explicit write-once
/// cache per dataset: empty, then populated exactly once, then read-only
/// for the life of the store. A failed fetch degrades to an empty
/// collection (logged, cached as empty, never retried here) so callers
/// always get a renderable, if degraded, view.
pub struct Camara {
    fuente: Box<dyn FuenteDatos>,
    diputados: OnceCell<Vec<Diputado>>,
    actas: OnceCell<Vec<Acta>>,
}

impl Camara {
    pub fn new(fuente: Box<dyn FuenteDatos>) -> Self {
        Self {
            fuente,
            diputados: OnceCell::new(),
            actas: OnceCell::new(),
        }
    }

    /// The deduplicated, decorated registry. Fetches on first call only.
    pub async fn diputados(&self) -> &[Diputado] {
        self.diputados
            .get_or_init(|| async {
                match self.fuente.fetch_diputados().await {
                    Ok(crudos) => {
                        let registro = construir_registro(crudos);
                        log::debug!("registro de diputados cargado: {}", registro.len());
                        registro
                    }
                    Err(error) => {
                        log::warn!("fallo la descarga de diputados: {error:#}");
                        Vec::new()
                    }
                }
            })
            .await
    }

    /// The filtered, decorated vote ledger. Fetches on first call only.
    pub async fn actas(&self) -> &[Acta] {
        self.actas
            .get_or_init(|| async {
                match self.fuente.fetch_actas().await {
                    Ok(crudas) => {
                        let actas = construir_actas(crudas);
                        log::debug!("actas cargadas: {}", actas.len());
                        actas
                    }
                    Err(error) => {
                        log::warn!("fallo la descarga de actas: {error:#}");
                        Vec::new()
                    }
                }
            })
            .await
    }

    pub async fn diputado_por_id(&self, id: &str) -> Option<&Diputado> {
        self.diputados()
            .await
            .iter()
            .find(|diputado| diputado.id == id)
    }

    pub async fn acta_por_id(&self, id: &str) -> Option<&Acta> {
        self.actas().await.iter().find(|acta| acta.id == id)
    }

    /// Every deputy with their annotated acta history and statistics.
    /// The two fetches run concurrently; reconciliation starts once both
    /// have landed.
    pub async fn fichas(&self) -> Vec<FichaDiputado<'_>> {
        let (diputados, actas) = tokio::join!(self.diputados(), self.actas());
        diputados
            .iter()
            .map(|diputado| ficha_de(diputado, actas))
            .collect()
    }

    pub async fn ficha(&self, id: &str) -> Option<FichaDiputado<'_>> {
        let (diputado, actas) = tokio::join!(self.diputado_por_id(id), self.actas());
        Some(ficha_de(diputado?, actas))
    }

    /// One acta with each vote resolved to its deputy, or to a
    /// placeholder when the name matches nothing.
    pub async fn acta_con_votos(&self, id: &str) -> Option<ActaDetalle<'_>> {
        let (acta, diputados) = tokio::join!(self.acta_por_id(id), self.diputados());
        let acta = acta?;
        Some(ActaDetalle {
            acta,
            votos: reconcilia::resolver_votos(acta, diputados),
        })
    }

    pub async fn bloques(&self) -> Bloques<'_> {
        bloques::agrupar_por_bloque(self.diputados().await)
    }

    pub async fn votos_sin_resolver(&self) -> Vec<VotoSinResolver> {
        let (diputados, actas) = tokio::join!(self.diputados(), self.actas());
        reconcilia::votos_sin_resolver(actas, diputados)
    }
}

fn ficha_de<'a>(diputado: &'a Diputado, actas: &'a [Acta]) -> FichaDiputado<'a> {
    let anotadas = reconcilia::actas_de(diputado, actas);
    let estadisticas = estadisticas::calcular(&anotadas);
    FichaDiputado {
        diputado,
        actas: anotadas,
        estadisticas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuente::FuenteEstatica;
    use crate::schema::{Periodo, RawActa, RawDiputado, RawVoto};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn raw_diputado(id: &str, apellido: &str, nombre: &str) -> RawDiputado {
        RawDiputado {
            id: id.to_string(),
            nombre: nombre.to_string(),
            apellido: apellido.to_string(),
            genero: "F".to_string(),
            provincia: "Mendoza".to_string(),
            periodo_mandato: Periodo {
                inicio: "2023-12-10".to_string(),
                fin: "2027-12-10".to_string(),
            },
            juramento_fecha: "2023-12-10".to_string(),
            cese_fecha: None,
            bloque: "Bloque A".to_string(),
            periodo_bloque: Periodo {
                inicio: "2023-12-10".to_string(),
                fin: "2027-12-10".to_string(),
            },
            foto: String::new(),
        }
    }

    fn raw_acta(id: &str, votos: &[(&str, &str)]) -> RawActa {
        RawActa {
            id: id.to_string(),
            periodo: "142".to_string(),
            reunion: "1".to_string(),
            numero_acta: "1".to_string(),
            titulo: format!("Acta {id}"),
            resultado: "afirmativo".to_string(),
            fecha: "2024-03-01".to_string(),
            presidente: "Menem, Martín".to_string(),
            votos_afirmativos: 1,
            votos_negativos: 0,
            abstenciones: 0,
            ausentes: 0,
            votos: votos
                .iter()
                .map(|(nombre, tipo)| RawVoto {
                    diputado: nombre.to_string(),
                    tipo_voto: tipo.to_string(),
                    imagen: None,
                    video_discurso: None,
                })
                .collect(),
        }
    }

    struct FuenteContadora {
        interna: FuenteEstatica,
        descargas: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl FuenteDatos for FuenteContadora {
        async fn fetch_diputados(&self) -> Result<Vec<RawDiputado>> {
            self.descargas.fetch_add(1, Ordering::SeqCst);
            self.interna.fetch_diputados().await
        }

        async fn fetch_actas(&self) -> Result<Vec<RawActa>> {
            self.descargas.fetch_add(1, Ordering::SeqCst);
            self.interna.fetch_actas().await
        }
    }

    struct FuenteRota;

    #[async_trait]
    impl FuenteDatos for FuenteRota {
        async fn fetch_diputados(&self) -> Result<Vec<RawDiputado>> {
            Err(anyhow!("503 service unavailable"))
        }

        async fn fetch_actas(&self) -> Result<Vec<RawActa>> {
            Err(anyhow!("503 service unavailable"))
        }
    }

    fn camara_de_prueba(descargas: Arc<AtomicUsize>) -> Camara {
        let fuente = FuenteContadora {
            interna: FuenteEstatica {
                diputados: vec![
                    raw_diputado("X", "Pérez", "Ana"),
                    raw_diputado("S", "Acevedo", "Sergio"),
                ],
                actas: vec![
                    raw_acta(
                        "A1",
                        &[
                            ("Pérez, Ana", "afirmativo"),
                            ("Acevedo, Sergio Edgardo", "negativo"),
                            ("Vilca, Rosa", "afirmativo"),
                        ],
                    ),
                    raw_acta("A2", &[("Pérez, Ana", "ausente")]),
                ],
            },
            descargas,
        };
        Camara::new(Box::new(fuente))
    }

    #[tokio::test]
    async fn repeated_reads_fetch_once_per_dataset() {
        let descargas = Arc::new(AtomicUsize::new(0));
        let camara = camara_de_prueba(descargas.clone());

        camara.diputados().await;
        camara.actas().await;
        camara.fichas().await;
        camara.diputado_por_id("X").await;
        camara.acta_por_id("A1").await;

        assert_eq!(descargas.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failing_source_degrades_to_empty_without_error() {
        let camara = Camara::new(Box::new(FuenteRota));
        assert!(camara.diputados().await.is_empty());
        assert!(camara.actas().await.is_empty());
        assert!(camara.fichas().await.is_empty());
        assert!(camara.diputado_por_id("X").await.is_none());
    }

    #[tokio::test]
    async fn fichas_join_registry_and_ledger() {
        let camara = camara_de_prueba(Arc::new(AtomicUsize::new(0)));
        let fichas = camara.fichas().await;
        assert_eq!(fichas.len(), 2);

        let ana = fichas
            .iter()
            .find(|ficha| ficha.diputado.id == "X")
            .unwrap();
        assert_eq!(ana.actas.len(), 2);
        assert_eq!(ana.estadisticas.total_votaciones, 2);
        assert_eq!(ana.estadisticas.votos_afirmativos, 1);
        assert_eq!(ana.estadisticas.ausencias, 1);
        assert_eq!(ana.estadisticas.presentismo, 50.0);

        // Alias spelling joins to the canonical registry entry.
        let sergio = fichas
            .iter()
            .find(|ficha| ficha.diputado.id == "S")
            .unwrap();
        assert_eq!(sergio.estadisticas.votos_negativos, 1);
    }

    #[tokio::test]
    async fn acta_detail_resolves_votes_and_placeholders() {
        let camara = camara_de_prueba(Arc::new(AtomicUsize::new(0)));
        let detalle = camara.acta_con_votos("A1").await.unwrap();
        assert_eq!(detalle.votos.len(), 3);

        let conocidos: Vec<_> = detalle.votos.iter().filter(|v| v.resuelto).collect();
        assert_eq!(conocidos.len(), 2);

        let fantasma = detalle.votos.iter().find(|v| !v.resuelto).unwrap();
        assert_eq!(fantasma.diputado.nombre_completo, "Vilca, Rosa");
        assert!(fantasma.diputado.id.is_empty());
    }

    #[tokio::test]
    async fn unresolved_report_flags_unknown_names() {
        let camara = camara_de_prueba(Arc::new(AtomicUsize::new(0)));
        let informe = camara.votos_sin_resolver().await;
        assert_eq!(informe.len(), 1);
        assert_eq!(informe[0].nombre, "Vilca, Rosa");
    }
}
