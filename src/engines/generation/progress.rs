use super::evolution_engine::ProgressCallback;
use super::statistics::GenerationStats;
use crate::types::BestIndividual;

/// Reports progress through the `log` facade
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("Generation {}", generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        log::info!("  Evaluated {} individuals", stats.evaluated);
        match &stats.summary {
            Some(s) => log::info!(
                "  Min {} Max {} Avg {} Std {} ({} valid)",
                s.min, s.max, s.mean, s.std, stats.valid
            ),
            None => log::warn!("  No valid individuals in generation {}", stats.generation),
        }
    }

    fn on_finished(&mut self, best: &BestIndividual) {
        log::info!(
            "Best individual is {:?} -> {} (fitness {})",
            best.genome, best.expression, best.fitness
        );
    }
}

// For handing progress to another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationStats),
    Finished(BestIndividual),
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete(stats.clone()));
    }

    fn on_finished(&mut self, best: &BestIndividual) {
        let _ = self.sender.send(ProgressMessage::Finished(best.clone()));
    }
}

impl ProgressCallback for () {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _stats: &GenerationStats) {}
    fn on_finished(&mut self, _best: &BestIndividual) {}
}
