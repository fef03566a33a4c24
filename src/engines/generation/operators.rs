use crate::engines::generation::genome::{Genome, Individual};
use rand::Rng;
use std::ops::RangeInclusive;

/// Tournament selection: pick best of K random candidates.
///
/// Candidates are drawn with replacement. A later candidate only wins with a
/// strictly higher score, so ties go to the first one drawn.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual {
    let mut best = &population[rng.gen_range(0..population.len())];

    for _ in 1..tournament_size {
        let candidate = &population[rng.gen_range(0..population.len())];
        if candidate.score() > best.score() {
            best = candidate;
        }
    }

    best
}

/// Select `count` independent copies via repeated tournaments
pub fn select_offspring<R: Rng>(
    population: &[Individual],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    (0..count)
        .map(|_| tournament_selection(population, tournament_size, rng).clone())
        .collect()
}

/// Single-point crossover: swap tails after one shared cut point, in place.
///
/// The cut lies in `1..len` where `len` is the shorter genome, so both
/// children keep their own length. Genomes shorter than two codons are
/// left untouched.
pub fn crossover<R: Rng>(first: &mut Genome, second: &mut Genome, rng: &mut R) {
    let len = first.len().min(second.len());
    if len <= 1 {
        return;
    }

    let point = rng.gen_range(1..len);
    first[point..len].swap_with_slice(&mut second[point..len]);
}

/// Mutation: redraw each codon with probability `indpb`.
///
/// Returns the number of codons that were redrawn.
pub fn mutate<R: Rng>(
    genome: &mut Genome,
    indpb: f64,
    gene_range: RangeInclusive<u32>,
    rng: &mut R,
) -> usize {
    let mut redrawn = 0;
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < indpb {
            *gene = rng.gen_range(gene_range.clone());
            redrawn += 1;
        }
    }
    redrawn
}

/// Generate random genome with codons uniform in `[0, attribute_size)`
pub fn random_genome<R: Rng>(length: usize, attribute_size: u32, rng: &mut R) -> Genome {
    (0..length)
        .map(|_| rng.gen_range(0..attribute_size))
        .collect()
}

/// Index of the highest-scoring individual; ties go to the earliest
pub fn best_index(population: &[Individual]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, individual) in population.iter().enumerate() {
        match best {
            Some(b) if population[b].score() >= individual.score() => {}
            _ => best = Some(i),
        }
    }
    best
}
