use serde::Serialize;

use crate::names;
use crate::schema::{Periodo, RawActa, RawDiputado, RawVoto};

/// A vote choice as recorded in an acta. The upstream field is free text;
/// anything outside the four recognized labels (plus the presiding
/// officer's procedural marker) is carried through as `Otro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoVoto {
    Afirmativo,
    Negativo,
    Abstencion,
    Ausente,
    Presidente,
    Otro(String),
}

impl TipoVoto {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "afirmativo" => TipoVoto::Afirmativo,
            "negativo" => TipoVoto::Negativo,
            "abstencion" | "abstención" => TipoVoto::Abstencion,
            "ausente" => TipoVoto::Ausente,
            "presidente" => TipoVoto::Presidente,
            _ => TipoVoto::Otro(raw.to_string()),
        }
    }
}

impl std::fmt::Display for TipoVoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let valor = match self {
            TipoVoto::Afirmativo => "afirmativo",
            TipoVoto::Negativo => "negativo",
            TipoVoto::Abstencion => "abstencion",
            TipoVoto::Ausente => "ausente",
            TipoVoto::Presidente => "presidente",
            TipoVoto::Otro(raw) => raw,
        };
        write!(f, "{valor}")
    }
}

/// A deduplicated, decorated deputy record. Built once by `registro` and
/// immutable afterwards; `nombre_completo` and `slug` are attached at
/// construction, never recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct Diputado {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub nombre_completo: String,
    pub slug: String,
    pub genero: String,
    pub provincia: String,
    pub bloque: String,
    pub periodo_bloque: Periodo,
    pub periodo_mandato: Periodo,
    pub juramento_fecha: String,
    pub cese_fecha: Option<String>,
    pub foto: String,
}

impl Diputado {
    pub fn desde_raw(raw: RawDiputado) -> Self {
        let nombre_completo = names::nombre_completo(&raw.apellido, &raw.nombre);
        let slug = names::slug(&nombre_completo);
        Self {
            id: raw.id,
            nombre: raw.nombre,
            apellido: raw.apellido,
            nombre_completo,
            slug,
            genero: raw.genero,
            provincia: raw.provincia,
            bloque: raw.bloque,
            periodo_bloque: raw.periodo_bloque,
            periodo_mandato: raw.periodo_mandato,
            juramento_fecha: raw.juramento_fecha,
            cese_fecha: raw.cese_fecha,
            foto: raw.foto,
        }
    }

    /// Stand-in for a vote entry whose name matches nothing in the
    /// registry (e.g. a deputy who left before the current term). Only
    /// the name is populated; descriptive fields stay empty.
    pub fn placeholder(nombre_crudo: &str) -> Self {
        let (apellido, nombre) = match nombre_crudo.split_once(',') {
            Some((apellido, nombre)) => (apellido.trim(), nombre.trim()),
            None => (nombre_crudo.trim(), ""),
        };
        let vacio = Periodo {
            inicio: String::new(),
            fin: String::new(),
        };
        Self {
            id: String::new(),
            nombre: nombre.to_string(),
            apellido: apellido.to_string(),
            nombre_completo: nombre_crudo.trim().to_string(),
            slug: names::slug(nombre_crudo),
            genero: String::new(),
            provincia: String::new(),
            bloque: String::new(),
            periodo_bloque: vacio.clone(),
            periodo_mandato: vacio,
            juramento_fecha: String::new(),
            cese_fecha: None,
            foto: String::new(),
        }
    }

    /// Display-layer check: mandate window covers `hoy` (ISO date). The
    /// core join never applies this; listings may.
    pub fn es_activo(&self, hoy: &str) -> bool {
        self.periodo_mandato.fin.as_str() > hoy
    }
}

/// One decorated vote entry: raw name kept verbatim, slug attached once.
#[derive(Debug, Clone, Serialize)]
pub struct Voto {
    pub diputado: String,
    pub slug: String,
    pub tipo: TipoVoto,
    pub imagen: Option<String>,
    pub video_discurso: Option<String>,
}

impl Voto {
    pub fn desde_raw(raw: RawVoto) -> Self {
        Self {
            slug: names::slug(&raw.diputado),
            tipo: TipoVoto::parse(&raw.tipo_voto),
            diputado: raw.diputado,
            imagen: raw.imagen,
            video_discurso: raw.video_discurso,
        }
    }
}

/// A roll-call record with its vote list filtered and decorated. The four
/// aggregate counts are the source's own figures, carried verbatim; they
/// are authoritative and never recomputed from `votos`.
#[derive(Debug, Clone, Serialize)]
pub struct Acta {
    pub id: String,
    pub periodo: String,
    pub reunion: String,
    pub numero_acta: String,
    pub titulo: String,
    pub resultado: String,
    pub fecha: String,
    pub presidente: String,
    pub votos_afirmativos: u32,
    pub votos_negativos: u32,
    pub abstenciones: u32,
    pub ausentes: u32,
    pub votos: Vec<Voto>,
}

impl Acta {
    /// The presiding officer appears in `votos` with a procedural
    /// non-vote entry; it is stripped here so the list holds at most one
    /// entry per deputy.
    pub fn desde_raw(raw: RawActa) -> Self {
        let votos = raw
            .votos
            .into_iter()
            .map(Voto::desde_raw)
            .filter(|voto| voto.tipo != TipoVoto::Presidente)
            .collect();
        Self {
            id: raw.id,
            periodo: raw.periodo,
            reunion: raw.reunion,
            numero_acta: raw.numero_acta,
            titulo: raw.titulo,
            resultado: raw.resultado,
            fecha: raw.fecha,
            presidente: raw.presidente,
            votos_afirmativos: raw.votos_afirmativos,
            votos_negativos: raw.votos_negativos,
            abstenciones: raw.abstenciones,
            ausentes: raw.ausentes,
            votos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_voto_parse_is_case_insensitive() {
        assert_eq!(TipoVoto::parse("AFIRMATIVO"), TipoVoto::Afirmativo);
        assert_eq!(TipoVoto::parse("Ausente"), TipoVoto::Ausente);
        assert_eq!(TipoVoto::parse("abstención"), TipoVoto::Abstencion);
        assert_eq!(
            TipoVoto::parse("licencia"),
            TipoVoto::Otro("licencia".to_string())
        );
    }

    #[test]
    fn placeholder_keeps_name_and_nothing_else() {
        let d = Diputado::placeholder("Vilca, Rosa");
        assert_eq!(d.nombre_completo, "Vilca, Rosa");
        assert_eq!(d.apellido, "Vilca");
        assert_eq!(d.nombre, "Rosa");
        assert_eq!(d.slug, "vilca rosa");
        assert!(d.id.is_empty());
        assert!(d.provincia.is_empty());
        assert!(d.bloque.is_empty());
    }
}
