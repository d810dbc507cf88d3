//! The document-level mention finder.
//!
//! One pass per document, no retries:
//!
//! 1. per sentence: premarked, named-entity, syntactic and enumeration
//!    extractors fill a fresh [`SentenceCandidates`];
//! 2. liberal mode only: named-entity modifiers over the whole document;
//! 3. per sentence: head assignment, then bare-plural tagging;
//! 4. the filter strategy chosen at construction runs over every sentence;
//! 5. survivors get sequential document-wide ids.
//!
//! A sentence missing tokens, its tree or its basic dependencies fails the
//! whole document; no partial result is returned.

use crate::dictionary::{Dictionaries, Dictionary};
use crate::extract::{
    tag_bare_plurals, CandidateExtractor, NamedEntityExtractor, NamedEntityModifierExtractor,
    NamedEntityStrings, SentenceCandidates, StringMatchModifierExtractor, SyntacticExtractor,
};
use crate::filter::{FilterResources, FilterStrategy};
use crate::head::{DependencyHeadFinder, HeadFinder};
use crate::observe::{FilterObserver, LogObserver};
use crate::pattern::{ConstituentMatcher, LabelPatternMatcher};
use crate::pleonastic::{ExtrapositionDetector, PleonasticDetector};
use crate::{Document, Error, Mention, MentionConfig, MentionId, Result, Sentence};

/// Per-sentence mention lists, index-aligned with the document's sentences.
pub type DocumentMentions = Vec<Vec<Mention>>;

/// Finds and filters coreference mentions.
pub struct MentionFinder {
    config: MentionConfig,
    strategy: FilterStrategy,
    named_entities: NamedEntityExtractor,
    syntactic: SyntacticExtractor,
    premarked: Vec<Box<dyn CandidateExtractor>>,
    enumerations: Vec<Box<dyn CandidateExtractor>>,
    modifiers: Box<dyn NamedEntityModifierExtractor>,
    head_finder: Box<dyn HeadFinder>,
    dictionary: Box<dyn Dictionary>,
    pleonastic: Box<dyn PleonasticDetector>,
}

impl std::fmt::Debug for MentionFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionFinder")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .field("premarked", &self.premarked.len())
            .field("enumerations", &self.enumerations.len())
            .finish_non_exhaustive()
    }
}

impl MentionFinder {
    /// Finder with the default collaborators.
    ///
    /// Fails with [`Error::Config`] when the language has no filter or the
    /// label pattern does not compile.
    pub fn new(config: MentionConfig) -> Result<Self> {
        MentionFinderBuilder::new(config).build()
    }

    /// Builder for swapping collaborators.
    #[must_use]
    pub fn builder(config: MentionConfig) -> MentionFinderBuilder {
        MentionFinderBuilder::new(config)
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &MentionConfig {
        &self.config
    }

    /// Filter variant selected for this configuration.
    #[must_use]
    pub fn strategy(&self) -> FilterStrategy {
        self.strategy
    }

    /// Extract, filter and number the mentions of a document.
    ///
    /// Removals are logged at debug level.
    pub fn find_mentions(&self, document: &Document) -> Result<DocumentMentions> {
        self.find_mentions_observed(document, &mut LogObserver)
    }

    /// [`find_mentions`](Self::find_mentions) reporting removals to `observer`.
    pub fn find_mentions_observed(
        &self,
        document: &Document,
        observer: &mut dyn FilterObserver,
    ) -> Result<DocumentMentions> {
        let mut mentions = self.extract_candidates(document)?;
        self.filter(document, &mut mentions, observer)?;
        assign_ids(&mut mentions);
        Ok(mentions)
    }

    /// Extraction, head assignment and bare-plural tagging, without filtering.
    ///
    /// Mention ids stay unassigned.
    pub fn extract_candidates(&self, document: &Document) -> Result<DocumentMentions> {
        let mut mentions = Vec::with_capacity(document.len());
        let mut span_sets = Vec::with_capacity(document.len());
        let mut entity_strings = NamedEntityStrings::new();

        for sentence in document.sentences() {
            check_annotations(sentence)?;
            let candidates = self.extract_sentence(sentence)?;
            entity_strings.add_sentence(sentence, candidates.named_entity_spans());
            let (list, spans, _) = candidates.into_parts();
            mentions.push(list);
            span_sets.push(spans);
        }

        if self.config.liberal {
            self.modifiers
                .extract(document, &entity_strings, &mut span_sets, &mut mentions)?;
        }

        for (sentence, list) in document.sentences().iter().zip(mentions.iter_mut()) {
            self.head_finder.find_heads(sentence, list)?;
            tag_bare_plurals(list);
        }

        log::debug!(
            "document '{}': {} candidates in {} sentences",
            document.id,
            mentions.iter().map(Vec::len).sum::<usize>(),
            document.len()
        );
        Ok(mentions)
    }

    /// Run the configured filter over mentions whose boundaries are given
    /// (gold or premarked), after head assignment and bare-plural tagging.
    pub fn filter_predicted_mentions(
        &self,
        document: &Document,
        mentions: DocumentMentions,
    ) -> Result<DocumentMentions> {
        self.filter_predicted_mentions_observed(document, mentions, &mut LogObserver)
    }

    /// [`filter_predicted_mentions`](Self::filter_predicted_mentions) reporting
    /// removals to `observer`.
    pub fn filter_predicted_mentions_observed(
        &self,
        document: &Document,
        mut mentions: DocumentMentions,
        observer: &mut dyn FilterObserver,
    ) -> Result<DocumentMentions> {
        if mentions.len() != document.len() {
            return Err(Error::invalid_input(format!(
                "{} mention lists for {} sentences",
                mentions.len(),
                document.len()
            )));
        }
        for (sentence, list) in document.sentences().iter().zip(mentions.iter_mut()) {
            check_annotations(sentence)?;
            check_belongs(sentence, list)?;
            self.head_finder.find_heads(sentence, list)?;
            tag_bare_plurals(list);
        }
        self.filter(document, &mut mentions, observer)?;
        assign_ids(&mut mentions);
        Ok(mentions)
    }

    fn extract_sentence(&self, sentence: &Sentence) -> Result<SentenceCandidates> {
        let mut candidates = SentenceCandidates::new();
        for extractor in &self.premarked {
            self.run_extractor(extractor.as_ref(), sentence, &mut candidates)?;
        }
        self.run_extractor(&self.named_entities, sentence, &mut candidates)?;
        self.run_extractor(&self.syntactic, sentence, &mut candidates)?;
        for extractor in &self.enumerations {
            self.run_extractor(extractor.as_ref(), sentence, &mut candidates)?;
        }
        Ok(candidates)
    }

    fn run_extractor(
        &self,
        extractor: &dyn CandidateExtractor,
        sentence: &Sentence,
        candidates: &mut SentenceCandidates,
    ) -> Result<()> {
        let before = candidates.mentions().len();
        extractor.extract(sentence, self.config.language, candidates)?;
        log::trace!(
            "sentence {}: {} filed {}",
            sentence.index(),
            extractor.name(),
            candidates.mentions().len() - before
        );
        Ok(())
    }

    fn filter(
        &self,
        document: &Document,
        mentions: &mut [Vec<Mention>],
        observer: &mut dyn FilterObserver,
    ) -> Result<()> {
        let resources = FilterResources {
            dictionary: self.dictionary.as_ref(),
            pleonastic: self.pleonastic.as_ref(),
        };
        self.strategy.apply(document, mentions, resources, observer)
    }
}

fn check_annotations(sentence: &Sentence) -> Result<()> {
    sentence.require_tokens()?;
    sentence.require_tree()?;
    sentence.require_basic_dependencies()?;
    Ok(())
}

/// Caller-supplied mentions must come from `sentence` and fit inside it.
fn check_belongs(sentence: &Sentence, mentions: &[Mention]) -> Result<()> {
    for mention in mentions {
        if mention.sentence_index() != sentence.index() {
            return Err(Error::invalid_input(format!(
                "mention {} of sentence {} given for sentence {}",
                mention.span(),
                mention.sentence_index(),
                sentence.index()
            )));
        }
        if !mention.span().fits(sentence.len()) {
            return Err(Error::invalid_input(format!(
                "mention {} exceeds the {} tokens of sentence {}",
                mention.span(),
                sentence.len(),
                sentence.index()
            )));
        }
    }
    Ok(())
}

/// Number surviving mentions in sentence and list order.
fn assign_ids(mentions: &mut [Vec<Mention>]) {
    let mut next: MentionId = 0;
    for mention in mentions.iter_mut().flatten() {
        mention.assign_id(next);
        next += 1;
    }
}

/// Builder for [`MentionFinder`].
pub struct MentionFinderBuilder {
    config: MentionConfig,
    matcher: Option<Box<dyn ConstituentMatcher>>,
    premarked: Vec<Box<dyn CandidateExtractor>>,
    enumerations: Vec<Box<dyn CandidateExtractor>>,
    modifiers: Option<Box<dyn NamedEntityModifierExtractor>>,
    head_finder: Option<Box<dyn HeadFinder>>,
    dictionary: Option<Box<dyn Dictionary>>,
    pleonastic: Option<Box<dyn PleonasticDetector>>,
}

impl MentionFinderBuilder {
    /// Start from a configuration with default collaborators.
    #[must_use]
    pub fn new(config: MentionConfig) -> Self {
        Self {
            config,
            matcher: None,
            premarked: Vec::new(),
            enumerations: Vec::new(),
            modifiers: None,
            head_finder: None,
            dictionary: None,
            pleonastic: None,
        }
    }

    /// Constituent matcher for the syntactic extractor.
    #[must_use]
    pub fn matcher(mut self, matcher: impl ConstituentMatcher + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Extractor run before the named-entity extractor.
    #[must_use]
    pub fn premarked(mut self, extractor: impl CandidateExtractor + 'static) -> Self {
        self.premarked.push(Box::new(extractor));
        self
    }

    /// Extractor run after the syntactic extractor.
    #[must_use]
    pub fn enumerations(mut self, extractor: impl CandidateExtractor + 'static) -> Self {
        self.enumerations.push(Box::new(extractor));
        self
    }

    /// Named-entity modifier pass for liberal mode.
    #[must_use]
    pub fn modifiers(mut self, extractor: impl NamedEntityModifierExtractor + 'static) -> Self {
        self.modifiers = Some(Box::new(extractor));
        self
    }

    /// Head finder.
    #[must_use]
    pub fn head_finder(mut self, finder: impl HeadFinder + 'static) -> Self {
        self.head_finder = Some(Box::new(finder));
        self
    }

    /// Dictionary for the filter.
    #[must_use]
    pub fn dictionary(mut self, dictionary: impl Dictionary + 'static) -> Self {
        self.dictionary = Some(Box::new(dictionary));
        self
    }

    /// Pleonastic detector for the filter.
    #[must_use]
    pub fn pleonastic(mut self, detector: impl PleonasticDetector + 'static) -> Self {
        self.pleonastic = Some(Box::new(detector));
        self
    }

    /// Select the filter strategy and assemble the finder.
    pub fn build(self) -> Result<MentionFinder> {
        let config = self.config;
        let strategy = FilterStrategy::select(
            config.language,
            config.liberal,
            config.remove_nested_mentions,
        )?;
        let matcher = match self.matcher {
            Some(matcher) => matcher,
            None => Box::new(LabelPatternMatcher::new(&config.mention_label_pattern)?),
        };
        log::debug!(
            "mention finder: language={} liberal={} strategy={:?}",
            config.language,
            config.liberal,
            strategy
        );
        Ok(MentionFinder {
            strategy,
            named_entities: NamedEntityExtractor::new(),
            syntactic: SyntacticExtractor::new(matcher),
            premarked: self.premarked,
            enumerations: self.enumerations,
            modifiers: self
                .modifiers
                .unwrap_or_else(|| Box::new(StringMatchModifierExtractor::new())),
            head_finder: self
                .head_finder
                .unwrap_or_else(|| Box::new(DependencyHeadFinder::new())),
            dictionary: self
                .dictionary
                .unwrap_or_else(|| Box::new(Dictionaries::english())),
            pleonastic: self
                .pleonastic
                .unwrap_or_else(|| Box::new(ExtrapositionDetector::new())),
            config,
        })
    }
}
