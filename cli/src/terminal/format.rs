use std::time::Duration;

use colored::*;
use reachr_common::config::Config;
use reachr_core::ResultSet;
use reachr_core::policy::Bucket;

use crate::rprint;
use crate::terminal::{colors, print};

pub fn bucket_title(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::AllowSuccess => "Allowed and reachable",
        Bucket::AllowFailed => "Allowed but unreachable",
        Bucket::DenySuccess => "Denied and blocked",
        Bucket::DenyFailed => "Denied but not confirmed blocked",
    }
}

fn paint_line(bucket: Bucket, line: &str) -> ColoredString {
    if bucket.is_failure() {
        format!("✘ {line}").color(colors::FAIL)
    } else {
        format!("✔ {line}").color(colors::PASS)
    }
}

/// Buckets to show for the given quiet level. `-qq` keeps failures only.
fn visible_buckets(results: &ResultSet, quiet: u8) -> Vec<(Bucket, &[String])> {
    results
        .iter()
        .filter(|(bucket, lines)| !lines.is_empty() && (quiet < 2 || bucket.is_failure()))
        .collect()
}

pub fn report(results: &ResultSet, total_time: Duration, cfg: &Config) {
    print::header("reachability report", cfg.quiet);
    if results.is_empty() {
        print::no_results();
        return;
    }

    let buckets = visible_buckets(results, cfg.quiet);
    for (idx, (bucket, lines)) in buckets.iter().enumerate() {
        print::tree_head(idx, bucket_title(*bucket), lines.len());
        let painted: Vec<ColoredString> = lines.iter().map(|line| paint_line(*bucket, line)).collect();
        print::as_tree_one_level(&painted);
        if idx + 1 != buckets.len() {
            rprint!();
        }
    }

    summary(results, total_time, cfg);
}

fn summary(results: &ResultSet, total_time: Duration, cfg: &Config) {
    let total = results.len();
    let failures = results.failures();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    let verdict: ColoredString = if failures == 0 {
        format!("{total} of {total} addresses match the policy").bold().green()
    } else {
        format!("{failures} of {total} addresses violate the policy").bold().red()
    };
    let output = format!("Check complete: {verdict} in {total_time}");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            rprint!();
            rprint!(&output);
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
