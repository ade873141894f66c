/// Catalog Linter: validates rule catalog coverage and quality.
///
/// Usage: catalog_linter <catalog.ron> [--with-builtin]

use emoji_story::core::catalog::RuleCatalog;
use emoji_story::core::matcher::covers_multiset;
use emoji_story::core::validation::is_pictographic;
use emoji_story::schema::symbol::Symbol;
use std::collections::HashSet;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog.ron> [--with-builtin]");
        process::exit(0);
    }

    let catalog_path = &args[1];
    let mut with_builtin = false;

    for arg in &args[2..] {
        if arg == "--with-builtin" {
            with_builtin = true;
        } else {
            eprintln!("Unknown argument: {}", arg);
            process::exit(1);
        }
    }

    let loaded = match RuleCatalog::load_from_ron(Path::new(catalog_path)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog file: {}", e);
            process::exit(1);
        }
    };

    // Lint the file as the engine would see it: after the built-ins.
    let catalog = if with_builtin {
        let mut base = RuleCatalog::builtin();
        base.merge(loaded);
        base
    } else {
        loaded
    };

    println!(
        "Loaded {} rules and {} symbol meanings",
        catalog.rule_count(),
        catalog.meaning_count()
    );

    let warnings = lint_catalog(&catalog);

    println!("\n=== Catalog Lint Report ===\n");

    if warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    println!("\nSummary: 0 errors, {} warnings", warnings.len());
}

/// Quality warnings for a catalog that already loaded. Load failures are
/// the only errors.
fn lint_catalog(catalog: &RuleCatalog) -> Vec<String> {
    let mut warnings = Vec::new();
    let rules = catalog.rules();

    for (index, rule) in rules.iter().enumerate() {
        let label = format!("Rule {} ({})", index, join(rule.pattern()));

        if rule.templates().len() < 3 {
            warnings.push(format!(
                "{} has only {} templates (minimum 3 recommended)",
                label,
                rule.templates().len()
            ));
        }

        let earlier_rules = &rules[..index];
        if let Some(earlier) = earlier_rules
            .iter()
            .position(|e| e.pattern() == rule.pattern())
        {
            warnings.push(format!(
                "{} duplicates the pattern of rule {}",
                label, earlier
            ));
        } else if let Some(earlier) = earlier_rules
            .iter()
            .position(|e| covers_multiset(rule.pattern(), e.pattern()))
        {
            // Any sequence holding this pattern also covers the earlier one.
            warnings.push(format!(
                "{} can never fire: rule {} ({}) always matches first",
                label,
                earlier,
                join(rules[earlier].pattern())
            ));
        }

        for symbol in rule.pattern() {
            if !is_pictographic(symbol.as_str()) {
                warnings.push(format!(
                    "{} uses '{}', which does not pass emoji validation",
                    label, symbol
                ));
            }
            if catalog.meanings(symbol).is_none() {
                warnings.push(format!(
                    "{} uses '{}', which has no meaning entry (themes will skip it)",
                    label, symbol
                ));
            }
        }
    }

    for (symbol, words) in catalog.meaning_entries() {
        if !is_pictographic(symbol.as_str()) {
            warnings.push(format!(
                "Meaning entry '{}' does not pass emoji validation",
                symbol
            ));
        }
        let unique: HashSet<&String> = words.iter().collect();
        if unique.len() != words.len() {
            warnings.push(format!("Meaning entry '{}' repeats a word", symbol));
        }
    }

    warnings
}

fn join(pattern: &[Symbol]) -> String {
    pattern
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
