use anyhow::Result;
use clap::{Parser, Subcommand};
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;
use time::OffsetDateTime;

use camara_core::fuente::{FuenteDatos, FuenteEstatica, HttpFuente};
use camara_core::store::Camara;
use camara_core::Config;

#[derive(Parser)]
#[command(name = "camara")]
#[command(about = "Votaciones de la Cámara de Diputados argentina", long_about = None)]
struct Cli {
    /// Ruta a un camara.toml alternativo
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Leer diputados.json y actas.json desde un directorio en vez de la API
    #[arg(long, global = true, value_name = "DIR")]
    desde_json: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Listar el registro deduplicado de diputados
    Diputados {
        #[arg(long)]
        bloque: Option<String>,
        #[arg(long)]
        provincia: Option<String>,
        /// Solo mandatos vigentes a la fecha
        #[arg(long)]
        activos: bool,
        #[arg(long)]
        json: bool,
    },
    /// Ficha de un diputado: historial de votaciones y estadísticas
    Diputado { id: String },
    /// Listar actas de votación
    Actas {
        #[arg(long)]
        json: bool,
    },
    /// Detalle de un acta con cada voto resuelto a su diputado
    Acta { id: String },
    /// Diputados agrupados por bloque, con color asignado
    Bloques,
    /// Nombres de votantes que no matchean registro ni alias
    SinResolver,
    /// Generar el árbol de informes markdown
    Informes {
        #[arg(long, default_value = "informes")]
        out: PathBuf,
    },
    /// Export canonical JSON Schemas
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Export JSON Schema files for the wire types
    Export {
        /// Output directory (default: ./schemas)
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::Schema { command } = &cli.command {
        let SchemaCommands::Export { out_dir } = command;
        return schema_export(out_dir.clone());
    }

    let config = Config::load(cli.config.as_deref())?;
    let fuente: Box<dyn FuenteDatos> = match &cli.desde_json {
        Some(dir) => Box::new(FuenteEstatica::desde_directorio(dir)?),
        None => Box::new(HttpFuente::new(&config)?),
    };
    let camara = Camara::new(fuente);

    match cli.command {
        Commands::Diputados {
            bloque,
            provincia,
            activos,
            json,
        } => listar_diputados(&camara, bloque, provincia, activos, json).await,
        Commands::Diputado { id } => mostrar_diputado(&camara, &id).await,
        Commands::Actas { json } => listar_actas(&camara, json).await,
        Commands::Acta { id } => mostrar_acta(&camara, &id).await,
        Commands::Bloques => mostrar_bloques(&camara).await,
        Commands::SinResolver => mostrar_sin_resolver(&camara).await,
        Commands::Informes { out } => generar_informes(&camara, out).await,
        Commands::Schema { .. } => unreachable!("handled above"),
    }
}

fn hoy() -> String {
    OffsetDateTime::now_utc().date().to_string()
}

async fn listar_diputados(
    camara: &Camara,
    bloque: Option<String>,
    provincia: Option<String>,
    activos: bool,
    json: bool,
) -> Result<()> {
    let fecha = hoy();
    let seleccion: Vec<_> = camara
        .diputados()
        .await
        .iter()
        .filter(|d| bloque.as_deref().is_none_or(|b| d.bloque == b))
        .filter(|d| provincia.as_deref().is_none_or(|p| d.provincia == p))
        .filter(|d| !activos || d.es_activo(&fecha))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&seleccion)?);
        return Ok(());
    }
    for diputado in &seleccion {
        println!(
            "{:<12} {:<35} {:<45} {}",
            diputado.id, diputado.nombre_completo, diputado.bloque, diputado.provincia
        );
    }
    println!("({} diputados)", seleccion.len());
    Ok(())
}

async fn mostrar_diputado(camara: &Camara, id: &str) -> Result<()> {
    let Some(ficha) = camara.ficha(id).await else {
        println!("Diputado no encontrado: {id}");
        return Ok(());
    };
    let d = ficha.diputado;
    let s = &ficha.estadisticas;

    println!("{} ({})", d.nombre_completo, d.id);
    println!("  Bloque:    {}", d.bloque);
    println!("  Provincia: {}", d.provincia);
    println!(
        "  Mandato:   {} a {}",
        d.periodo_mandato.inicio, d.periodo_mandato.fin
    );
    println!();
    println!("  Votaciones:   {}", s.total_votaciones);
    println!("  Afirmativos:  {}", s.votos_afirmativos);
    println!("  Negativos:    {}", s.votos_negativos);
    println!("  Abstenciones: {}", s.abstenciones);
    println!("  Ausencias:    {}", s.ausencias);
    println!("  Presentismo:  {}%", s.presentismo);
    println!();
    for anotada in &ficha.actas {
        let voto = match &anotada.voto {
            Some(tipo) => tipo.to_string(),
            None => "sin voto".to_string(),
        };
        println!(
            "  {}  {:<12} {}",
            anotada.acta.fecha, voto, anotada.acta.titulo
        );
    }
    Ok(())
}

async fn listar_actas(camara: &Camara, json: bool) -> Result<()> {
    let actas = camara.actas().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&actas)?);
        return Ok(());
    }
    for acta in actas {
        println!(
            "{:<14} {}  {:<12} {}",
            acta.id, acta.fecha, acta.resultado, acta.titulo
        );
    }
    println!("({} actas)", actas.len());
    Ok(())
}

async fn mostrar_acta(camara: &Camara, id: &str) -> Result<()> {
    let Some(detalle) = camara.acta_con_votos(id).await else {
        println!("Acta no encontrada: {id}");
        return Ok(());
    };
    let acta = detalle.acta;

    println!("{}", acta.titulo);
    println!("  Acta N° {} — {} — resultado: {}", acta.numero_acta, acta.fecha, acta.resultado);
    println!("  Presidencia: {}", acta.presidente);
    println!(
        "  Totales de la fuente: {} afirmativos, {} negativos, {} abstenciones, {} ausentes",
        acta.votos_afirmativos, acta.votos_negativos, acta.abstenciones, acta.ausentes
    );
    println!();
    for resuelto in &detalle.votos {
        let marca = if resuelto.resuelto { " " } else { "?" };
        let bloque = if resuelto.diputado.bloque.is_empty() {
            "-"
        } else {
            resuelto.diputado.bloque.as_str()
        };
        println!(
            "  {marca} {:<35} {:<45} {}",
            resuelto.diputado.nombre_completo, bloque, resuelto.voto.tipo
        );
    }
    Ok(())
}

async fn mostrar_bloques(camara: &Camara) -> Result<()> {
    let bloques = camara.bloques().await;
    for (bloque, diputados) in &bloques.grupos {
        let color = bloques
            .colores
            .get(bloque)
            .map(String::as_str)
            .unwrap_or("-");
        println!("{bloque} ({}) [{color}]", diputados.len());
        for diputado in diputados {
            println!("  {}", diputado.nombre_completo);
        }
    }
    Ok(())
}

async fn mostrar_sin_resolver(camara: &Camara) -> Result<()> {
    let informe = camara.votos_sin_resolver().await;
    if informe.is_empty() {
        println!("Sin votos pendientes de resolver.");
        return Ok(());
    }
    for pendiente in &informe {
        println!(
            "{:<40} {} apariciones en {} actas",
            pendiente.nombre,
            pendiente.apariciones,
            pendiente.actas.len()
        );
    }
    Ok(())
}

async fn generar_informes(camara: &Camara, out: PathBuf) -> Result<()> {
    let fichas = camara.fichas().await;
    let actas = camara.actas().await;
    let sin_resolver = camara.votos_sin_resolver().await;
    informes::generar(&out, &fichas, actas, &sin_resolver)?;
    println!("Informes generados en {}", out.display());
    Ok(())
}

fn schema_export(out_dir: PathBuf) -> Result<()> {
    fs::create_dir_all(&out_dir)?;

    let diputado_schema = schema_for!(camara_core::schema::RawDiputado);
    let diputado_json = serde_json::to_string_pretty(&diputado_schema)?;
    fs::write(out_dir.join("Diputado.schema.json"), diputado_json)?;

    let acta_schema = schema_for!(camara_core::schema::RawActa);
    let acta_json = serde_json::to_string_pretty(&acta_schema)?;
    fs::write(out_dir.join("Acta.schema.json"), acta_json)?;

    let voto_schema = schema_for!(camara_core::schema::RawVoto);
    let voto_json = serde_json::to_string_pretty(&voto_schema)?;
    fs::write(out_dir.join("Voto.schema.json"), voto_json)?;

    println!("Exported schemas to {}", out_dir.display());
    Ok(())
}
