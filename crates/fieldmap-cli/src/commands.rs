use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::Serialize;
use tracing::info_span;

use fieldmap_cli::input::load_extracted_fields;
use fieldmap_cli::logging::redact_value;
use fieldmap_cli::store::HistoryRepository;
use fieldmap_map::{
    ConfidenceThresholds, DiscoveredField, FieldRelationship, MappingEngine, MappingResolver,
    MappingSession, SessionOptions, SessionReport, clean_field_name, detect_relationships,
    discover_fields, document_fields, overall_confidence, search_catalog,
};
use fieldmap_model::{DocumentField, HistoricalMapping, HistoryScope, ManufacturerId, TemplateId};
use fieldmap_standards::{DoctorReport, MatchingStandards};

use crate::cli::{AcceptArgs, CatalogArgs, OutputFormatArg, SessionArgs, SuggestArgs};
use crate::summary::{print_catalog, print_recorded, print_search, print_suggestions};

/// JSON shape of `fieldmap suggest --output json`.
#[derive(Serialize)]
struct SuggestOutput<'a> {
    document_type: &'a str,
    manufacturer: &'a ManufacturerId,
    template_id: &'a TemplateId,
    #[serde(flatten)]
    report: &'a SessionReport,
    relationships: Vec<FieldRelationship>,
    /// Mean extraction confidence reported for the input fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    extraction_confidence: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    auto_accepted: Vec<HistoricalMapping>,
}

/// Standards from `--standards-dir`, else the env override or embedded tables.
pub fn load_standards(dir: Option<&Path>) -> Result<MatchingStandards> {
    match dir {
        Some(dir) => MatchingStandards::from_dir(dir)
            .with_context(|| format!("load standards from {}", dir.display())),
        None => MatchingStandards::load_default().context("load standards"),
    }
}

pub fn run_suggest(args: &SuggestArgs, standards: &MatchingStandards) -> Result<()> {
    let session_args = &args.session;
    let span = info_span!(
        "suggest",
        document_type = %session_args.document_type,
        manufacturer = %session_args.manufacturer,
    );
    let _guard = span.enter();

    let prepared = prepare(session_args)?;
    let scope = prepared.scope();
    let repository = args
        .history_dir
        .as_deref()
        .map(HistoryRepository::new)
        .transpose()?;
    let history = match &repository {
        Some(repository) => repository.load(&scope)?,
        None => Vec::new(),
    };
    tracing::info!(entries = history.len(), "loaded history");

    let engine = MappingEngine::new(standards);
    let already_mapped: Vec<String> = args
        .already_mapped
        .iter()
        .map(String::as_str)
        .map(clean_field_name)
        .filter(|name| !name.is_empty())
        .collect();
    let mut report = MappingSession::new(&engine, prepared.document_type.as_str())
        .with_options(session_options(session_args))
        .with_already_mapped(already_mapped)
        .run(&prepared.fields(), &prepared.manufacturer, &history);

    let thresholds = ConfidenceThresholds::default();
    let mut auto_accepted = Vec::new();
    if args.auto_accept {
        let Some(repository) = &repository else {
            bail!("--auto-accept needs --history-dir");
        };
        let resolver = MappingResolver::new(prepared.manufacturer.clone());
        auto_accepted = resolver.auto_accept(&mut report.results, &thresholds, Utc::now());
        if !auto_accepted.is_empty() {
            let path = repository.append_all(auto_accepted.clone())?;
            tracing::info!(
                count = auto_accepted.len(),
                path = %path.display(),
                "recorded auto-accepted mappings"
            );
        }
    }

    match args.output {
        OutputFormatArg::Json => {
            let output = SuggestOutput {
                document_type: &session_args.document_type,
                manufacturer: &prepared.manufacturer,
                template_id: &prepared.template_id,
                report: &report,
                relationships: detect_relationships(&prepared.discovered),
                extraction_confidence: overall_confidence(&prepared.discovered),
                auto_accepted,
            };
            let json = serde_json::to_string_pretty(&output).context("serialize suggestions")?;
            println!("{json}");
        }
        OutputFormatArg::Table => {
            print_suggestions(&report, &thresholds);
            if let Some(repository) = &repository
                && !auto_accepted.is_empty()
            {
                print_recorded(&auto_accepted, repository.base_dir());
            }
        }
    }
    Ok(())
}

pub fn run_accept(args: &AcceptArgs, standards: &MatchingStandards) -> Result<()> {
    let session_args = &args.session;
    let span = info_span!(
        "accept",
        document_type = %session_args.document_type,
        manufacturer = %session_args.manufacturer,
        requested = %args.target,
    );
    let _guard = span.enter();

    let prepared = prepare(session_args)?;
    let name = clean_field_name(&args.field);
    let Some(discovered) = prepared.discovered.iter().find(|d| d.field.raw_name == name) else {
        bail!(
            "field '{}' not found in {}",
            args.field,
            session_args.fields.display()
        );
    };
    tracing::debug!(context = redact_value(&discovered.field.context), "accepting field");

    let repository = HistoryRepository::new(&args.history_dir)?;
    let history = repository.load(&prepared.scope())?;
    let engine = MappingEngine::new(standards);
    let mut report = MappingSession::new(&engine, prepared.document_type.as_str())
        .with_options(session_options(session_args))
        .run(
            std::slice::from_ref(&discovered.field),
            &prepared.manufacturer,
            &history,
        );
    let Some(result) = report.results.first_mut() else {
        bail!("no mapping result for field '{}'", args.field);
    };

    let resolver = MappingResolver::new(prepared.manufacturer.clone());
    let mapping = if args.manual {
        resolver.accept_manual(result, &args.target, standards.catalog(), Utc::now())?
    } else {
        resolver.accept_target(result, &args.target, Utc::now())?
    };
    let path = repository.append(mapping.clone())?;
    tracing::info!(
        mapped_to = %mapping.target,
        confidence = mapping.accepted_confidence,
        path = %path.display(),
        "recorded mapping"
    );
    print_recorded(std::slice::from_ref(&mapping), &path);
    Ok(())
}

pub fn run_catalog(args: &CatalogArgs, standards: &MatchingStandards) -> Result<()> {
    match &args.search {
        Some(query) => {
            let matches = search_catalog(query, standards.catalog(), args.limit);
            print_search(query, &matches);
        }
        None => print_catalog(standards.catalog().iter()),
    }
    Ok(())
}

pub fn run_doctor(standards: &MatchingStandards) -> Result<()> {
    let report = DoctorReport::from_standards(standards);
    let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
    println!("{json}");
    Ok(())
}

/// Discovered fields of one input file plus the identifiers of its session.
struct PreparedSession {
    discovered: Vec<DiscoveredField>,
    manufacturer: ManufacturerId,
    document_type: String,
    template_id: TemplateId,
}

impl PreparedSession {
    fn fields(&self) -> Vec<DocumentField> {
        document_fields(&self.discovered)
    }

    fn scope(&self) -> HistoryScope {
        HistoryScope::new(self.manufacturer.clone(), self.document_type.clone())
    }
}

fn prepare(args: &SessionArgs) -> Result<PreparedSession> {
    if args.document_type.trim().is_empty() {
        bail!("--document-type must not be empty");
    }
    if args.manufacturer.trim().is_empty() {
        bail!("--manufacturer must not be empty");
    }
    let template_id = args
        .template
        .clone()
        .or_else(|| {
            args.fields
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .map(TemplateId::new)
        .unwrap_or_else(|| TemplateId::new("template"));
    let extracted = load_extracted_fields(&args.fields)?;
    let document_type = args.document_type.trim().to_string();
    let discovered = discover_fields(&extracted, &document_type, &template_id);
    if discovered.is_empty() {
        tracing::warn!(path = %args.fields.display(), "no usable fields in input");
    }
    Ok(PreparedSession {
        discovered,
        manufacturer: ManufacturerId::new(args.manufacturer.as_str()),
        document_type,
        template_id,
    })
}

fn session_options(args: &SessionArgs) -> SessionOptions {
    SessionOptions::default()
        .with_min_confidence(args.min_confidence)
        .with_max_results(args.max_results)
}
