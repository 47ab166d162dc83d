use crate::genetic_algorithm::Chromosome;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate solution: one gene per item, `true` meaning "included".
///
/// Individuals are plain values. Cloning copies the gene buffer, so a child
/// never shares storage with the parent it was derived from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Individual {
    genes: Vec<bool>,
}

impl Individual {
    /// Each gene independently set with probability 0.5.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self {
            genes: (0..len).map(|_| rng.gen_bool(0.5)).collect(),
        }
    }

    pub fn zeroed(len: usize) -> Self {
        Self {
            genes: vec![false; len],
        }
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [bool] {
        &mut self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn is_zeroed(&self) -> bool {
        self.genes.iter().all(|&gene| !gene)
    }

    pub fn flip(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }

    /// Indices of the included items, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter(|(_, gene)| **gene)
            .map(|(index, _)| index)
    }

    pub fn bits(&self) -> Vec<u8> {
        self.genes.iter().map(|&gene| u8::from(gene)).collect()
    }
}

impl From<Vec<bool>> for Individual {
    fn from(genes: Vec<bool>) -> Self {
        Self { genes }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.bits().iter().join(", "))
    }
}

impl Chromosome for Individual {
    fn len(&self) -> usize {
        self.genes.len()
    }
}
