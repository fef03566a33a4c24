/// Deterministically consumes codons from a genome, front to back
pub struct GeneConsumer<'a> {
    genome: &'a [u32],
    position: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(genome: &'a [u32]) -> Self {
        Self { genome, position: 0 }
    }

    /// Consume next codon, or `None` once the genome is exhausted.
    /// Unlike a wrapping consumer, an exhausted genome ends the derivation.
    pub fn consume(&mut self) -> Option<u32> {
        let gene = *self.genome.get(self.position)?;
        self.position += 1;
        Some(gene)
    }

    /// Consume a codon and map it to a choice index
    pub fn choose(&mut self, num_choices: usize) -> Option<usize> {
        if num_choices == 0 {
            return None;
        }
        self.consume().map(|gene| gene as usize % num_choices)
    }

    /// Check if codons remain
    pub fn has_genes(&self) -> bool {
        self.position < self.genome.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
