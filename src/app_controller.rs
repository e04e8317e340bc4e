use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::annotation;
use crate::app_config::Config;
use crate::assembler::{HybridOutcome, PacketAssembler, PacketCredits, PacketReport};
use crate::database::{build_packets, load_rows, Packet};
use crate::document::{load_document, DocumentSink, RichDocument};
use crate::file_utils::FileManager;
use crate::providers::{CachedLookup, DirectorLookup, Tmdb};

// @module: Application controller for answerline formatting

/// Outcome of a complete run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One report per packet, in packet order
    pub packets: Vec<PacketReport>,
    /// Visual answers documents written
    pub answers_files: Vec<PathBuf>,
    /// Hybrid packets written
    pub hybrid_files: Vec<PathBuf>,
}

impl RunSummary {
    pub fn question_count(&self) -> usize {
        self.packets.iter().map(|p| p.questions).sum()
    }

    pub fn skipped_hybrid_count(&self) -> usize {
        self.packets
            .iter()
            .filter(|p| matches!(p.hybrid, HybridOutcome::SkippedCapacity { .. }))
            .count()
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Director lookup, when metadata is enabled
    lookup: Option<CachedLookup>,
    // @field: Log every answerline
    verbose: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let lookup = if config.metadata.enabled {
            let tmdb = Tmdb::new(
                config.metadata.api_key.clone(),
                config.metadata.endpoint.clone(),
                config.metadata.timeout_secs,
            );
            Some(CachedLookup::new(Arc::new(tmdb)))
        } else {
            None
        };

        Ok(Self {
            config,
            lookup,
            verbose: false,
        })
    }

    /// Create a controller using the given lookup service regardless of the metadata settings
    pub fn with_lookup(config: Config, lookup: Arc<dyn DirectorLookup>) -> Self {
        Self {
            config,
            lookup: Some(CachedLookup::new(lookup)),
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole formatting pass
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let config = &self.config;

        let rows = load_rows(&config.database_path)
            .with_context(|| format!("Failed to load answerline database {:?}", config.database_path))?;
        let packets = build_packets(&rows).context("Invalid answerline database")?;
        info!("Loaded {} rows in {} packets from {:?}", rows.len(), packets.len(), config.database_path);

        FileManager::ensure_dir(&config.output_dir)?;
        let written = self.discover_written_packets(packets.len())?;

        let slug = config.set_slug();
        let format = config.output_format;
        let assembler = PacketAssembler::new(config.assembler_options(self.verbose));
        let combined_path = FileManager::answers_path(&config.output_dir, &slug, format);

        let progress_bar = ProgressBar::new(packets.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} packets ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let mut summary = RunSummary::default();
        let mut combined = RichDocument::new();

        for (index, packet) in packets.iter().enumerate() {
            progress_bar.set_message(format!("Packet {}", packet.name));
            let credits = self.resolve_packet_credits(packet).await;

            let mut split_doc = RichDocument::new();
            let visual: &mut RichDocument = if config.split_docs {
                &mut split_doc
            } else {
                &mut combined
            };
            assembler.open_section(visual, &config.set_name, packet, config.split_docs || index == 0);

            let mut hybrid_doc = match &written {
                Some(paths) => Some(
                    load_document(&paths[index])
                        .with_context(|| format!("Failed to read written packet {:?}", paths[index]))?,
                ),
                None => None,
            };

            let report = assembler
                .assemble(packet, &credits, visual, hybrid_doc.as_mut())
                .with_context(|| format!("Failed to assemble packet {}", packet.name))?;

            if let (HybridOutcome::Written { .. }, Some(doc)) = (report.hybrid, &hybrid_doc) {
                let path = FileManager::hybrid_path(config.hybrid_dest_dir(), &slug, &packet.padded_name(), format);
                doc.save(&path)
                    .with_context(|| format!("Failed to write hybrid packet {:?}", path))?;
                debug!("Wrote hybrid packet {:?}", path);
                summary.hybrid_files.push(path);
            }

            let answers_path = if config.split_docs {
                FileManager::packet_answers_path(&config.output_dir, &slug, &packet.padded_name(), format)
            } else {
                combined_path.clone()
            };
            visual
                .save(&answers_path)
                .with_context(|| format!("Failed to write answers document {:?}", answers_path))?;
            if !summary.answers_files.contains(&answers_path) {
                summary.answers_files.push(answers_path);
            }

            summary.packets.push(report);
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("Packets complete");

        if !config.split_docs && config.try_open && !packets.is_empty() {
            if let Err(e) = FileManager::open_in_viewer(&combined_path) {
                warn!("Could not open {:?}: {}", combined_path, e);
            }
        }

        self.log_summary(&summary, start_time);
        Ok(summary)
    }

    /// Locate written packets for hybrid generation.
    ///
    /// Returns `None`, with a warning, whenever hybrid packets cannot be made
    /// for this run.
    fn discover_written_packets(&self, packet_count: usize) -> Result<Option<Vec<PathBuf>>> {
        if !self.config.hybrid.enabled {
            return Ok(None);
        }

        let source_dir = self.config.written_source_dir();
        if !FileManager::dir_exists(&source_dir) {
            warn!("Written packet folder {:?} does not exist, skipping hybrid packets", source_dir);
            return Ok(None);
        }

        let found = FileManager::find_written_packets(&source_dir, &self.config.hybrid.written_suffix)?;
        if found.is_empty() {
            warn!(
                "There aren't any written packets ending in '{}' in {:?}, skipping hybrid packets",
                self.config.hybrid.written_suffix, source_dir
            );
            return Ok(None);
        }
        if found.len() != packet_count {
            warn!(
                "Found {} written packets but the database has {} packets, skipping hybrid packets",
                found.len(),
                packet_count
            );
            return Ok(None);
        }

        info!("Using {} written packets from {:?}", found.len(), source_dir);
        Ok(Some(found))
    }

    async fn resolve_packet_credits(&self, packet: &Packet) -> PacketCredits {
        let mut credits = PacketCredits::new();
        for question in &packet.questions {
            let resolved = annotation::resolve_credits(question, self.lookup.as_ref()).await;
            credits.insert(question.number, resolved);
        }
        credits
    }

    fn log_summary(&self, summary: &RunSummary, start_time: Instant) {
        info!(
            "Formatted {} questions in {} packets in {:.1}s",
            summary.question_count(),
            summary.packets.len(),
            start_time.elapsed().as_secs_f64()
        );
        for path in &summary.answers_files {
            info!("Answers: {}", path.display());
        }
        if !summary.hybrid_files.is_empty() {
            info!("Wrote {} hybrid packets", summary.hybrid_files.len());
        }
        let skipped = summary.skipped_hybrid_count();
        if skipped > 0 {
            warn!("{} hybrid packets were skipped for lack of space", skipped);
        }
        if let Some(lookup) = &self.lookup {
            let (hits, misses, rate) = lookup.cache().stats();
            debug!("Director cache: {} hits, {} misses ({:.0}% hit rate)", hits, misses, rate * 100.0);
        }
    }
}
