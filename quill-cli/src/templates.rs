//! Post templates
//!
//! The four built-in prompt templates a job can be started with. The
//! template text is the whole prompt; the backend treats it as an opaque
//! message.

use clap::ValueEnum;

/// Kind of post to generate from the source paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PostTemplate {
    /// Explain the key concepts and findings of the paper
    Explainer,
    /// Analyze strengths, weaknesses, and limitations
    Critique,
    /// Discuss implications and potential impact
    Consequences,
    /// Highlight remaining research questions and gaps
    OpenQuestions,
}

impl PostTemplate {
    /// The full prompt sent to the backend for this template
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Explainer => {
                "Create an engaging post that explains the key concepts, methodology, and \
                 findings of this machine learning paper. Make it accessible to a broad \
                 professional audience while highlighting the technical innovations and \
                 practical applications."
            }
            Self::Critique => {
                "Write a thoughtful post that provides a balanced critique of this ML/AI \
                 paper. Analyze the strengths of the research, identify potential \
                 limitations or weaknesses, discuss the methodology, and evaluate the \
                 significance of the contributions to the field."
            }
            Self::Consequences => {
                "Develop a post discussing the broader implications and potential \
                 consequences of this machine learning research. Explore how these \
                 findings might impact industry practices, future research directions, \
                 ethical considerations, and real-world applications."
            }
            Self::OpenQuestions => {
                "Create a post that highlights the interesting open questions and \
                 research gaps that remain after this ML/AI paper. Discuss what future \
                 research could explore, unresolved challenges, and how the community \
                 might build upon these findings."
            }
        }
    }
}
