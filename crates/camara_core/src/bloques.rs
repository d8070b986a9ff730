use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Serialize;

use crate::model::Diputado;

/// Deputies grouped by political bloc, plus a stable bloc → hex color
/// assignment for chart consumers.
#[derive(Debug, Clone, Serialize)]
pub struct Bloques<'a> {
    pub grupos: BTreeMap<String, Vec<&'a Diputado>>,
    pub colores: HashMap<String, String>,
}

// Blocs with an established visual identity keep a fixed color.
const COLORES_PREASIGNADOS: &[(&str, &str)] = &[
    ("Movimiento Popular  Neuquino", "#3b82f6"),
    ("La Libertad Avanza", "#a855f7"),
    ("Independencia", "#ef4444"),
    ("Hacemos Coalicion Federal", "#22c55e"),
    ("Frente de Izquierda y de Trabajadores Unidad", "#60a5fa"),
    ("Sin Bloque", "#6b7280"),
    ("Produccion y Trabajo", "#eab308"),
    ("Pro", "#eab308"),
    ("Ucr - Union Civica Radical", "#ef4444"),
    ("Union por la Patria", "#3b82f6"),
    ("Creo", "#3b82f6"),
    ("La Union Mendocina", "#3b82f6"),
    ("Innovacion Federal", "#93c5fd"),
    ("Buenos Aires Libre", "#bfdbfe"),
    ("Por Santa Cruz", "#2563eb"),
    ("Avanza Libertad", "#9333ea"),
];

// Rotating fallback palette for blocs without a preassigned color.
const COLORES_BASE: &[&str] = &[
    "#e57373", "#f06292", "#ba68c8", "#9575cd",
    "#7986cb", "#64b5f6", "#4fc3f7", "#4dd0e1",
    "#4db6ac", "#81c784", "#aed581", "#dce775",
    "#fff176", "#ffd54f", "#ffb74d", "#ff8a65",
];

/// Group deputies by bloc and assign each bloc a color. Fallback colors
/// rotate in first-appearance order of the bloc in the input, so the
/// assignment is stable for a stable registry.
pub fn agrupar_por_bloque<'a>(diputados: &'a [Diputado]) -> Bloques<'a> {
    let mut grupos: BTreeMap<String, Vec<&'a Diputado>> = BTreeMap::new();
    let mut colores: HashMap<String, String> = HashMap::new();
    let mut siguiente = 0usize;

    for diputado in diputados {
        grupos
            .entry(diputado.bloque.clone())
            .or_default()
            .push(diputado);

        if !colores.contains_key(&diputado.bloque) {
            let color = match color_preasignado(&diputado.bloque) {
                Some(color) => color.to_string(),
                None => {
                    let color = COLORES_BASE[siguiente % COLORES_BASE.len()];
                    siguiente += 1;
                    color.to_string()
                }
            };
            colores.insert(diputado.bloque.clone(), color);
        }
    }

    Bloques { grupos, colores }
}

fn color_preasignado(bloque: &str) -> Option<&'static str> {
    COLORES_PREASIGNADOS
        .iter()
        .find(|(nombre, _)| *nombre == bloque)
        .map(|(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Periodo, RawDiputado};

    fn diputado(id: &str, bloque: &str) -> Diputado {
        Diputado::desde_raw(RawDiputado {
            id: id.to_string(),
            nombre: "Ana".to_string(),
            apellido: "Pérez".to_string(),
            genero: "F".to_string(),
            provincia: "Chaco".to_string(),
            periodo_mandato: Periodo {
                inicio: "2023-12-10".to_string(),
                fin: "2027-12-10".to_string(),
            },
            juramento_fecha: "2023-12-10".to_string(),
            cese_fecha: None,
            bloque: bloque.to_string(),
            periodo_bloque: Periodo {
                inicio: "2023-12-10".to_string(),
                fin: "2027-12-10".to_string(),
            },
            foto: String::new(),
        })
    }

    #[test]
    fn groups_by_bloc() {
        let diputados = vec![
            diputado("1", "Pro"),
            diputado("2", "Union por la Patria"),
            diputado("3", "Pro"),
        ];
        let bloques = agrupar_por_bloque(&diputados);
        assert_eq!(bloques.grupos["Pro"].len(), 2);
        assert_eq!(bloques.grupos["Union por la Patria"].len(), 1);
    }

    #[test]
    fn preassigned_blocs_keep_their_color() {
        let diputados = vec![diputado("1", "La Libertad Avanza")];
        let bloques = agrupar_por_bloque(&diputados);
        assert_eq!(bloques.colores["La Libertad Avanza"], "#a855f7");
    }

    #[test]
    fn unknown_blocs_rotate_through_base_palette() {
        let diputados = vec![
            diputado("1", "Bloque Inventado A"),
            diputado("2", "Bloque Inventado B"),
            diputado("3", "Bloque Inventado A"),
        ];
        let bloques = agrupar_por_bloque(&diputados);
        assert_eq!(bloques.colores["Bloque Inventado A"], COLORES_BASE[0]);
        assert_eq!(bloques.colores["Bloque Inventado B"], COLORES_BASE[1]);
    }
}
