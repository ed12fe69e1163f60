// main.rs - Conway's Game of Life on a toroidal 25x45 grid

use eframe::egui;
use egui::Color32;

mod grid;
mod patterns;
mod sim;
mod ui;

use sim::Simulation;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([680.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Game of Life on a Torus",
        options,
        Box::new(|_cc| Box::new(LifeApp::default())),
    )
}

/// Top-level app state: the simulation controller plus display-only settings.
pub struct LifeApp {
    pub sim: Simulation,
    pub selected_preset: usize,
    pub live_color: Color32,
    pub dead_color: Color32,
}

impl Default for LifeApp {
    fn default() -> Self {
        Self {
            sim: Simulation::new(),
            selected_preset: 0,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
        }
    }
}
