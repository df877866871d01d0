// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    run_ui_mode()
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("📱 Banca Móvil - prototipo de pago de agua potable");
    println!("   Todos los datos son simulados; ningún pago es real.\n");
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new();
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
