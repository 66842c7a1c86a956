//! Units of batch work.

use echora_core::EffectMode;
use std::path::{Path, PathBuf};

/// One input file to transform into one output file.
///
/// A job is owned by the worker that runs it; its buffers never leave
/// that worker.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    id: usize,
    input: PathBuf,
    output: PathBuf,
    effect: EffectMode,
}

impl ProcessingJob {
    /// Create a job.
    pub fn new(
        id: usize,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        effect: EffectMode,
    ) -> Self {
        Self {
            id,
            input: input.into(),
            output: output.into(),
            effect,
        }
    }

    /// Build one job per `(input, output)` pair, all sharing `effect`.
    ///
    /// Job ids follow the pair order, starting at 0.
    pub fn from_pairs<I, P, Q>(pairs: I, effect: &EffectMode) -> Vec<Self>
    where
        I: IntoIterator<Item = (P, Q)>,
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        pairs
            .into_iter()
            .enumerate()
            .map(|(id, (input, output))| Self::new(id, input, output, effect.clone()))
            .collect()
    }

    /// Submission index within the batch.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Input file.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Output file.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Effect to apply.
    pub fn effect(&self) -> &EffectMode {
        &self.effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echora_core::EchoParameters;

    #[test]
    fn from_pairs_numbers_jobs_in_order() {
        let effect = EffectMode::Echo(EchoParameters::new(10, 0.5).unwrap());
        let jobs = ProcessingJob::from_pairs(
            vec![("a.wav", "a_out.wav"), ("b.wav", "b_out.wav")],
            &effect,
        );
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id(), 0);
        assert_eq!(jobs[1].id(), 1);
        assert_eq!(jobs[1].input(), Path::new("b.wav"));
        assert_eq!(jobs[1].output(), Path::new("b_out.wav"));
        assert_eq!(jobs[0].effect().name(), "echo");
    }
}
