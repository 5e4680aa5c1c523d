use minic_drv::{compile, Config};

fn main() {
    if let Err(e) = run() {
        // All diagnostics go to stdout, including the final error line
        println!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args().skip(1))?;
    compile(&config)?;
    Ok(())
}
