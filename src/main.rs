use cfgevo::config::{AppConfig, ConfigManager};
use cfgevo::engines::generation::{EvolutionEngine, Grammar, LogProgressCallback};
use cfgevo::functions::ArithmeticFitness;
use cfgevo::types::RunReport;
use std::env;

fn main() -> anyhow::Result<()> {
    // Usage: cfgevo [config.toml] [report.json]
    let args: Vec<String> = env::args().collect();

    let manager = ConfigManager::new();
    if let Some(path) = args.get(1) {
        manager.load_from_file(path)?;
    }
    let AppConfig { evolution, logging } = manager.get();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(logging.level))
        .init();

    let mut engine = EvolutionEngine::new(evolution, Grammar::arithmetic(), ArithmeticFitness)?;
    let result = engine.run(LogProgressCallback);

    println!("Best individual is");
    println!("\t{:?}", result.best.genome);
    println!("\t{}", result.best.expression);
    println!();
    println!("Result: {}", result.best.fitness);

    if let Some(path) = args.get(2) {
        let report = RunReport::from(&result).to_json()?;
        std::fs::write(path, report)?;
        log::info!("Run report written to {}", path);
    }

    Ok(())
}
