// src/main.rs
//
// Calculatrice RPN — point d’entrée NATIF + WEB (WASM)
// ----------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//     calculatrice_rpn                 # interface graphique
//     calculatrice_rpn -e "<expr>"     # une évaluation, réponse JSON sur stdout
//     calculatrice_rpn -j '<json>'     # un corps de requête brut {"expression": ...}
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

mod app;
mod config;
mod noyau;
mod service;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice RPN";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Traces sur stderr (RUST_LOG) : stdout reste réservé aux réponses JSON.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let reglages = config::Reglages::depuis_env();
    let args: Vec<String> = std::env::args().collect();

    match (args.get(1).map(String::as_str), args.get(2)) {
        (None, _) => lancer_gui(reglages),

        (Some("-e" | "--eval"), Some(expr)) => {
            let service = service::CalcService::new(reglages);
            imprimer(service.repondre(&service::RequeteCalcul::texte(expr.as_str())))
        }

        (Some("-j" | "--json"), Some(corps)) => {
            let service = service::CalcService::new(reglages);
            imprimer(service.traiter_json(corps))
        }

        (Some("-h" | "--help"), _) => {
            print_help();
            std::process::ExitCode::SUCCESS
        }

        (Some(autre), _) => {
            eprintln!("argument inattendu: {autre}");
            print_help();
            std::process::ExitCode::from(2)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn imprimer((statut, corps): (u16, String)) -> std::process::ExitCode {
    println!("{corps}");
    if statut == service::STATUT_OK {
        std::process::ExitCode::SUCCESS
    } else {
        std::process::ExitCode::FAILURE
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_help() {
    println!("{TITRE_APP}");
    println!();
    println!("Usage:");
    println!("  calculatrice_rpn                 interface graphique");
    println!("  calculatrice_rpn -e <expression> évalue et imprime la réponse JSON");
    println!("  calculatrice_rpn -j <json>       traite un corps {{\"expression\": ...}}");
    println!();
    println!("Variables: RUST_LOG, CALC_LONGUEUR_MAX, CALC_DIGITS (natif seulement)");
}

#[cfg(not(target_arch = "wasm32"))]
fn lancer_gui(reglages: config::Reglages) -> std::process::ExitCode {
    use eframe::egui;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([400.0, 560.0]),
        ..Default::default()
    };

    let res = eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(reglages)))),
    );

    match res {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(erreur = %e, "interface graphique interrompue");
            std::process::ExitCode::FAILURE
        }
    }
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
