/// Story Preview: interactive shell for trying catalogs and translations.
///
/// Usage: story_preview [--catalog <path>]... [--no-builtin] [--seed <n>]
///
/// Commands:
///   translate <emoji...>  translate a sequence
///   preview <emoji...>    validate, translate and list themes (JSON)
///   themes <emoji...>     list themes for a sequence
///   validate <emoji...>   check every symbol is an emoji
///   bulk <n> <emoji...>   translate n times and report variety
///   seed <n>              set RNG seed
///   rules                 list loaded rules in priority order
///   help                  list commands
///   quit                  exit

use emoji_story::core::engine::TranslationEngine;
use emoji_story::core::validation::range_of;
use emoji_story::schema::symbol::{split_symbols, Symbol};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut catalog_paths = Vec::new();
    let mut builtin = true;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_paths.push(args[i].clone());
            }
            "--no-builtin" => {
                builtin = false;
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = TranslationEngine::builder().builtin(builtin);
    for path in &catalog_paths {
        builder = builder.catalog_path(path);
    }
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} rules, {} symbol meanings",
        engine.catalog().rule_count(),
        engine.catalog().meaning_count()
    );
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let mut rng = StdRng::seed_from_u64(seed);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("story> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };
        let sequence = split_symbols(rest);

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "translate" | "t" => {
                let text = engine.translate_with(&sequence, &mut rng);
                let source = if sequence.is_empty() {
                    "empty"
                } else if engine.match_rules(&sequence).is_some() {
                    "rule"
                } else {
                    "synthesized"
                };
                println!("\n--- Translation ({}) ---", source);
                println!("{}", text);
                println!("--- End ---\n");
            }
            "preview" | "p" => match engine.preview_with(&sequence, &mut rng) {
                Ok(preview) => match serde_json::to_string_pretty(&preview) {
                    Ok(json) => println!("{}", json),
                    Err(e) => println!("ERROR: {}", e),
                },
                Err(e) => println!("ERROR: {}", e),
            },
            "themes" => {
                let mut themes: Vec<String> = engine.story_themes(&sequence).into_iter().collect();
                themes.sort();
                if themes.is_empty() {
                    println!("(no themes)");
                } else {
                    println!("{}", themes.join(", "));
                }
            }
            "validate" | "v" => {
                if sequence.is_empty() {
                    println!("Usage: validate <emoji...>");
                    continue;
                }
                for symbol in &sequence {
                    print_validation(symbol);
                }
                println!(
                    "Sequence is {}",
                    if engine.validate_emoji_sequence(&sequence) {
                        "valid"
                    } else {
                        "INVALID"
                    }
                );
            }
            "bulk" => {
                let mut parts = rest.splitn(2, char::is_whitespace);
                let count: usize = match parts.next().and_then(|n| n.parse().ok()) {
                    Some(n) if n > 0 => n,
                    _ => {
                        println!("Usage: bulk <n> <emoji...>");
                        continue;
                    }
                };
                let sequence = split_symbols(parts.next().unwrap_or(""));
                if sequence.is_empty() {
                    println!("Usage: bulk <n> <emoji...>");
                    continue;
                }

                let mut counts: HashMap<String, usize> = HashMap::new();
                for _ in 0..count {
                    let text = engine.translate_with(&sequence, &mut rng);
                    *counts.entry(text).or_default() += 1;
                }
                let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
                ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

                println!("\n--- {} translations, {} distinct ---", count, ranked.len());
                for (text, n) in ranked.iter().take(10) {
                    println!("{:>5}  {}", n, text);
                }
                if ranked.len() > 10 {
                    println!("  ... {} more", ranked.len() - 10);
                }
                println!();
            }
            "seed" => {
                if rest.is_empty() {
                    println!("Current seed: {}", seed);
                    continue;
                }
                match rest.parse::<u64>() {
                    Ok(s) => {
                        seed = s;
                        rng = StdRng::seed_from_u64(seed);
                        println!("Seed set to {}", seed);
                    }
                    Err(_) => {
                        println!("Invalid seed: {}", rest);
                    }
                }
            }
            "rules" => {
                for (index, rule) in engine.catalog().rules().iter().enumerate() {
                    let pattern: Vec<&str> = rule.pattern().iter().map(Symbol::as_str).collect();
                    println!(
                        "{:>3}  {:<12} {}",
                        index,
                        pattern.join(" "),
                        rule.primary_template()
                    );
                }
            }
            other => {
                println!("Unknown command: {}. Type 'help' for commands.", other);
            }
        }
    }
}

fn print_validation(symbol: &Symbol) {
    let first = symbol.as_str().chars().next();
    match first.and_then(range_of) {
        Some(range) => println!("  {}  ok ({})", symbol, range.name),
        None => match first {
            Some(c) => println!("  {}  not an emoji (U+{:04X})", symbol, c as u32),
            None => println!("  (empty)  not an emoji"),
        },
    }
}

fn print_usage() {
    println!("Usage: story_preview [--catalog <path>]... [--no-builtin] [--seed <n>]");
    println!();
    println!("Options:");
    println!("  --catalog <path>  Layer a RON catalog over the base (repeatable)");
    println!("  --no-builtin      Start from an empty catalog");
    println!("  --seed <n>        RNG seed for fallback narratives (default: 42)");
}

fn print_help() {
    println!("Commands:");
    println!("  translate <emoji...>  Translate a sequence");
    println!("  preview <emoji...>    Validate, translate and list themes (JSON)");
    println!("  themes <emoji...>     List themes for a sequence");
    println!("  validate <emoji...>   Check every symbol is an emoji");
    println!("  bulk <n> <emoji...>   Translate n times and report variety");
    println!("  seed <n>              Set RNG seed");
    println!("  rules                 List loaded rules in priority order");
    println!("  help                  Show this help");
    println!("  quit                  Exit");
}
