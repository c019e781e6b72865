use meet_datastore::DataStore;

use crate::{llm::summarizer::Summarizer, video::VideoPlatform, TranscriptPipeline};

pub struct TranscriptPipelineBuilder<D = (), V = (), S = ()> {
    store: D,
    video: V,
    summarizer: S,
}

impl TranscriptPipelineBuilder {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            store: (),
            video: (),
            summarizer: (),
        }
    }
}

impl<D, V, S> TranscriptPipelineBuilder<D, V, S> {
    pub fn store<D2: DataStore + Send + Sync + 'static>(
        self,
        store: D2,
    ) -> TranscriptPipelineBuilder<D2, V, S> {
        TranscriptPipelineBuilder {
            store,
            video: self.video,
            summarizer: self.summarizer,
        }
    }

    pub fn video<V2: VideoPlatform + Send + Sync + 'static>(
        self,
        video: V2,
    ) -> TranscriptPipelineBuilder<D, V2, S> {
        TranscriptPipelineBuilder {
            store: self.store,
            video,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> TranscriptPipelineBuilder<D, V, S2> {
        TranscriptPipelineBuilder {
            store: self.store,
            video: self.video,
            summarizer,
        }
    }
}

impl<D, V, S> TranscriptPipelineBuilder<D, V, S>
where
    D: DataStore + Send + Sync + 'static,
    V: VideoPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> TranscriptPipeline<D, V, S> {
        TranscriptPipeline {
            store: self.store,
            video: self.video,
            summarizer: self.summarizer,
        }
    }
}
