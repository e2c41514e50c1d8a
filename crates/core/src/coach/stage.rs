use crate::conversation::Message;
use crate::router::Classification;

/// Where a turn currently is.
///
/// ```text
/// Start -> Classifying -+-> GeneratingCoach ----+-> Done
///                       +-> GeneratingOffTopic -+
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TurnStage {
    Start,
    Classifying,
    GeneratingCoach,
    GeneratingOffTopic,
    Done {
        classification: Classification,
        reply: Message,
    },
}

impl TurnStage {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            TurnStage::Start => "start",
            TurnStage::Classifying => "classifying",
            TurnStage::GeneratingCoach => "generating_coach",
            TurnStage::GeneratingOffTopic => "generating_off_topic",
            TurnStage::Done { .. } => "done",
        }
    }

    /// The generation stage a classification leads to.
    #[inline]
    pub fn after_classification(classification: Classification) -> Self {
        match classification {
            Classification::OnTopic => TurnStage::GeneratingCoach,
            Classification::OffTopic => TurnStage::GeneratingOffTopic,
        }
    }
}
