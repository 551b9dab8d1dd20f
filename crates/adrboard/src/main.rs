//! `adrb` - CLI for adrboard
//!
//! This binary lists, searches and reports on architecture decision records,
//! and drafts new ones.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;

use adrboard::analytics::{ComplianceReport, DashboardStats, QualityTier};
use adrboard::cli::{
    Cli, Command, ConfigCommand, DraftCommand, ListCommand, OutputFormat, PolicyCommand,
    SearchCommand, ShowCommand, TimelineCommand,
};
use adrboard::search::{self, RELEVANCE_SEGMENTS, SUGGESTED_QUERIES};
use adrboard::timeline::{filter_events, group_by_month};
use adrboard::{
    init_logging, query, Adr, Config, Draft, Filter, PolicyToggleStore, RecordStore,
    SimulatedGenerator,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    let load_store = || RecordStore::load(&config.dataset).context("failed to load ADR dataset");

    // Execute the command
    match cli.command {
        Command::List(cmd) => handle_list(&config, &load_store()?, &cmd),
        Command::Show(cmd) => handle_show(&config, &load_store()?, &cmd),
        Command::Search(cmd) => handle_search(&config, &load_store()?, &cmd),
        Command::Stats(cmd) => handle_stats(&config, &load_store()?, cmd.json),
        Command::Compliance(cmd) => handle_compliance(&config, &load_store()?, cmd.json),
        Command::Timeline(cmd) => handle_timeline(&config, &load_store()?, &cmd),
        Command::Templates(cmd) => handle_templates(&load_store()?, cmd.json),
        Command::Policy(cmd) => handle_policy(&config, &load_store()?, cmd),
        Command::Draft(cmd) => handle_draft(&config, &load_store()?, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A rule of `=` as wide as `heading` appears in a terminal.
fn underline(heading: &str) -> String {
    "=".repeat(heading.chars().count())
}

fn quality_label(adr: &Adr) -> String {
    adr.quality_score.map_or_else(
        || "-".to_string(),
        |score| format!("{score} ({})", QualityTier::from_score(score)),
    )
}

fn handle_list(config: &Config, store: &RecordStore, cmd: &ListCommand) -> Result<()> {
    let criteria = Filter {
        status: cmd.status.into(),
        category: cmd.category.into(),
        text: cmd.query.clone(),
    };
    let results = query::list(store.all(), &criteria, cmd.sort.into());

    match cmd.format {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Table => {
            println!(
                "{:<10} {:<11} {:<20} {:<13} {:<10} TITLE",
                "NUMBER", "STATUS", "CATEGORY", "QUALITY", "UPDATED"
            );
            for adr in &results {
                println!(
                    "{:<10} {:<11} {:<20} {:<13} {:<10} {}",
                    config.format_number(adr.number),
                    adr.status.to_string(),
                    adr.category.to_string(),
                    quality_label(adr),
                    adr.last_updated.to_string(),
                    adr.title
                );
            }
        }
        OutputFormat::Plain => {
            println!(
                "{} decisions across {} categories",
                store.len(),
                query::unique_categories(store.all()).len()
            );
            println!();
            if results.is_empty() {
                println!("No ADRs match the given filters.");
            }
            for adr in &results {
                println!(
                    "{} [{}] {}",
                    config.format_number(adr.number),
                    adr.status.label(),
                    adr.title
                );
                println!(
                    "    {} | updated {} | quality {} | {}",
                    adr.category.label(),
                    adr.last_updated,
                    quality_label(adr),
                    adr.authors.join(", ")
                );
            }
        }
    }
    Ok(())
}

fn handle_show(config: &Config, store: &RecordStore, cmd: &ShowCommand) -> Result<()> {
    let Some(adr) = store.get_by_id(&cmd.id) else {
        bail!("ADR not found: {}", cmd.id);
    };
    let lineage = store.resolve_supersession(adr);
    let related = store.resolve_related(adr);

    if cmd.json {
        return print_json(&json!({
            "adr": adr,
            "supersedes": lineage.supersedes.map(|a| &a.id),
            "supersededBy": lineage.superseded_by.map(|a| &a.id),
            "related": related.iter().map(|a| &a.id).collect::<Vec<_>>(),
            "actions": adr.status.actions(),
        }));
    }

    let heading = format!("{}: {}", config.format_number(adr.number), adr.title);
    println!("{heading}");
    println!("{}", underline(&heading));
    println!("Status:      {}", adr.status.label());
    println!("Category:    {}", adr.category.label());
    println!("Date:        {}", adr.date);
    println!("Updated:     {}", adr.last_updated);
    println!("Authors:     {}", adr.authors.join(", "));
    println!("Quality:     {}", quality_label(adr));
    if let Some(risk) = adr.risk_classification {
        println!("Risk:        {}", risk.label());
    }
    if !adr.tags.is_empty() {
        println!("Tags:        {}", adr.tags.join(", "));
    }
    if !adr.compliance_frameworks.is_empty() {
        let frameworks: Vec<_> = adr
            .compliance_frameworks
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Compliance:  {}", frameworks.join(", "));
    }
    if let Some(model) = &adr.model_version {
        println!("Model:       {model}");
    }
    if let Some(dataset) = &adr.dataset_version {
        println!("Dataset:     {dataset}");
    }

    println!();
    println!("[Context]");
    println!("{}", adr.context);
    println!();
    println!("[Decision]");
    println!("{}", adr.decision);
    println!();
    println!("[Consequences]");
    println!("{}", adr.consequences);
    if let Some(alternatives) = &adr.alternatives {
        println!();
        println!("[Alternatives]");
        println!("{alternatives}");
    }

    if adr.supersedes.is_some() || adr.superseded_by.is_some() || !related.is_empty() {
        println!();
        println!("[Lineage]");
        if let Some(previous) = lineage.supersedes {
            println!("  Supersedes:    {} {}", previous.id, previous.title);
        }
        if let Some(next) = lineage.superseded_by {
            println!("  Superseded by: {} {}", next.id, next.title);
        }
        for other in &related {
            println!("  Related:       {} {}", other.id, other.title);
        }
    }

    if !adr.linked_prs.is_empty() || !adr.linked_experiments.is_empty() {
        println!();
        println!("[Links]");
        for pr in &adr.linked_prs {
            println!("  PR:         {pr}");
        }
        for experiment in &adr.linked_experiments {
            println!("  Experiment: {experiment}");
        }
    }

    let actions = adr.status.actions();
    if !actions.is_empty() {
        let labels: Vec<_> = actions.iter().map(|a| a.label).collect();
        println!();
        println!("Available actions: {}", labels.join(", "));
    }
    Ok(())
}

fn handle_search(config: &Config, store: &RecordStore, cmd: &SearchCommand) -> Result<()> {
    if cmd.query.trim().is_empty() {
        println!("Suggested searches:");
        for suggestion in SUGGESTED_QUERIES {
            println!("  {suggestion}");
        }
        println!();
        println!("Contextual ADRs:");
        for adr in search::contextual(store.all()) {
            println!("  {} {}", config.format_number(adr.number), adr.title);
        }
        return Ok(());
    }

    let limit = cmd.limit.unwrap_or(config.search.default_limit);
    let hits: Vec<_> = search::search_hits(store.all(), &cmd.query, config.display.snippet_length)
        .into_iter()
        .take(limit)
        .collect();

    match cmd.format {
        OutputFormat::Json => print_json(&hits)?,
        OutputFormat::Table => {
            println!(
                "{:<10} {:<10} {:<11} TITLE",
                "RELEVANCE", "NUMBER", "STATUS"
            );
            for hit in &hits {
                println!(
                    "{:<10} {:<10} {:<11} {}",
                    format!("{}%", search::relevance_percent(hit.relevance)),
                    config.format_number(hit.adr.number),
                    hit.adr.status.to_string(),
                    hit.adr.title
                );
            }
        }
        OutputFormat::Plain => {
            println!("{} results for \"{}\"", hits.len(), cmd.query);
            for hit in &hits {
                let lit = search::relevance_segments(hit.relevance);
                let bar = format!(
                    "{}{}",
                    "#".repeat(lit as usize),
                    ".".repeat(RELEVANCE_SEGMENTS.saturating_sub(lit) as usize)
                );
                let fields: Vec<_> = hit.matched_fields.iter().map(ToString::to_string).collect();
                println!();
                println!(
                    "[{bar}] {:>3}% {} {}",
                    search::relevance_percent(hit.relevance),
                    config.format_number(hit.adr.number),
                    search::highlight(&hit.adr.title, &cmd.query)
                );
                println!("    matched: {}", fields.join(", "));
                println!("    {}", search::highlight(&hit.snippet, &cmd.query));
            }
        }
    }
    Ok(())
}

fn handle_stats(config: &Config, store: &RecordStore, json: bool) -> Result<()> {
    let stats = DashboardStats::compute(store.all(), config.display.recent_limit);
    if json {
        return print_json(&stats);
    }

    println!("Dashboard");
    println!("=========");
    println!("Total ADRs:      {}", stats.total);
    println!("Accepted:        {}", stats.by_status.accepted);
    println!("Proposed:        {}", stats.by_status.proposed);
    println!("Deprecated:      {}", stats.by_status.deprecated);
    println!("Superseded:      {}", stats.by_status.superseded);
    println!("Average quality: {}", stats.average_quality);
    println!("High risk:       {}", stats.high_risk);
    println!();
    println!("Recently updated:");
    for adr in &stats.recent {
        println!(
            "  {} {} ({})",
            config.format_number(adr.number),
            adr.title,
            adr.last_updated
        );
    }
    Ok(())
}

fn handle_compliance(config: &Config, store: &RecordStore, json: bool) -> Result<()> {
    let policies = PolicyToggleStore::new(store.policy_triggers().to_vec());
    let report = ComplianceReport::compute(store.all(), &policies);
    if json {
        return print_json(&json!({
            "report": report,
            "enforcementLevel": config.policy.enforcement_level,
            "policies": policies.triggers(),
        }));
    }

    println!("Compliance");
    println!("==========");
    println!("Compliance-linked ADRs: {}", report.compliance_linked.len());
    println!("High-risk ADRs:         {}", report.high_risk.len());
    println!("Pending review:         {}", report.proposed.len());
    println!(
        "Active policies:        {}/{}",
        report.enabled_policies, report.total_policies
    );
    println!();
    println!("Frameworks:");
    for entry in &report.frameworks {
        println!(
            "  {:<18} {:>3}  {:>5.1}%",
            entry.framework.to_string(),
            entry.count,
            entry.share * 100.0
        );
    }
    if !report.high_risk_pending.is_empty() {
        println!();
        println!("High-risk ADRs awaiting acceptance:");
        for adr in &report.high_risk_pending {
            println!("  {} {}", config.format_number(adr.number), adr.title);
        }
    }
    println!();
    print_policies(config, &policies);
    Ok(())
}

fn handle_timeline(config: &Config, store: &RecordStore, cmd: &TimelineCommand) -> Result<()> {
    let events = filter_events(store.timeline_events(), cmd.event_type.into());
    let groups = group_by_month(&events);
    let lineage = store.lineage();
    if cmd.json {
        return print_json(&json!({
            "months": groups,
            "lineage": lineage.iter().map(|adr| &adr.id).collect::<Vec<_>>(),
        }));
    }

    if groups.is_empty() {
        println!("No timeline events.");
        println!();
    }
    for group in &groups {
        println!("{}", group.label);
        for event in &group.events {
            println!(
                "  {} {:<10} {} - {}",
                event.date,
                event.kind.to_string(),
                event.adr_title,
                event.description
            );
        }
        println!();
    }

    println!("Decision lineage");
    for adr in &lineage {
        let links = store.resolve_supersession(adr);
        println!("  {} {}", config.format_number(adr.number), adr.title);
        if let Some(previous) = links.supersedes {
            println!("      supersedes {}", config.format_number(previous.number));
        }
        if let Some(next) = links.superseded_by {
            println!("      superseded by {}", config.format_number(next.number));
        }
        let related: Vec<_> = store
            .resolve_related(adr)
            .iter()
            .map(|other| config.format_number(other.number))
            .collect();
        if !related.is_empty() {
            println!("      related to {}", related.join(", "));
        }
    }
    Ok(())
}

fn handle_templates(store: &RecordStore, json: bool) -> Result<()> {
    if json {
        return print_json(store.templates());
    }
    for template in store.templates() {
        println!("{:<22} {}", template.id, template.name);
        let category = template.category.label();
        println!("    {category} | {}", template.description);
    }
    Ok(())
}

fn print_policies(config: &Config, policies: &PolicyToggleStore) {
    let level = config.policy.enforcement_level;
    println!("Policy triggers (enforcement: {level})");
    for trigger in policies.triggers() {
        let state = if trigger.enabled { "on " } else { "off" };
        let blocking = if trigger.enabled && level.blocks(trigger.severity) {
            " [blocks merge]"
        } else {
            ""
        };
        println!(
            "  [{state}] {:<8} {:<13} {}{blocking}",
            trigger.id,
            trigger.severity.label(),
            trigger.name
        );
        println!("        {}", trigger.pattern);
    }
}

fn handle_policy(config: &Config, store: &RecordStore, cmd: PolicyCommand) -> Result<()> {
    let mut policies = PolicyToggleStore::new(store.policy_triggers().to_vec());
    match cmd {
        PolicyCommand::List { json } => {
            if json {
                return print_json(policies.triggers());
            }
            println!("{}", config.policy.enforcement_level.description());
            println!();
            print_policies(config, &policies);
        }
        PolicyCommand::Toggle { ids, json } => {
            let changes: Vec<_> = ids
                .iter()
                .map(|id| (id.as_str(), policies.toggle(id)))
                .collect();
            if json {
                return print_json(policies.triggers());
            }
            for (id, state) in changes {
                match state {
                    Some(true) => println!("{id}: enabled"),
                    Some(false) => println!("{id}: disabled"),
                    None => println!("{id}: not found (unchanged)"),
                }
            }
            println!();
            print_policies(config, &policies);
            println!();
            println!("Changes apply to this session only.");
        }
    }
    Ok(())
}

fn print_draft(draft: &Draft) {
    println!("{}", draft.title);
    println!("{}", underline(&draft.title));
    println!("Category: {}", draft.category.label());
    if !draft.tags.is_empty() {
        println!("Tags:     {}", draft.tags.join(", "));
    }
    for (heading, body) in [
        ("Context", &draft.context),
        ("Decision", &draft.decision),
        ("Consequences", &draft.consequences),
        ("Alternatives", &draft.alternatives),
    ] {
        if !body.is_empty() {
            println!();
            println!("[{heading}]");
            println!("{body}");
        }
    }
    println!();
    println!("Fingerprint: {}", draft.fingerprint);
}

fn handle_draft(config: &Config, store: &RecordStore, cmd: &DraftCommand) -> Result<()> {
    let generator = SimulatedGenerator::new(config.generation_delay(), store.templates().to_vec());
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let draft = runtime.block_on(async {
        let task = generator.start(cmd.source())?;
        task.wait_or_cancel(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await
    });

    let draft = match draft {
        Ok(draft) => draft,
        Err(e) if e.is_cancelled() => {
            eprintln!("Draft generation cancelled.");
            return Ok(());
        }
        Err(e) => return Err(e).context("draft generation failed"),
    };

    if cmd.json() {
        return print_json(&draft);
    }
    if draft.is_empty() {
        println!("Nothing to draft from the given input.");
        return Ok(());
    }
    print_draft(&draft);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                return print_json(config);
            }
            println!("Current Configuration");
            println!("=====================");
            println!();
            println!("[Dataset]");
            match &config.dataset.path {
                Some(path) => println!("  Path:               {}", path.display()),
                None => println!("  Path:               (built-in seed)"),
            }
            println!(
                "  Strict references:  {}",
                config.dataset.strict_references
            );
            println!();
            println!("[Display]");
            println!("  Number format:      {}", config.display.number_format);
            println!("  Recent limit:       {}", config.display.recent_limit);
            println!("  Snippet length:     {}", config.display.snippet_length);
            println!();
            println!("[Search]");
            println!("  Default limit:      {}", config.search.default_limit);
            println!();
            println!("[Generation]");
            println!("  Delay (ms):         {}", config.generation.delay_ms);
            println!();
            println!("[Policy]");
            println!(
                "  Enforcement level:  {}",
                config.policy.enforcement_level
            );
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
