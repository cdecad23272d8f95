use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::league::{Conference, Roster};
use crate::pool::RankedEntry;
use crate::scoring::{PerTeamDetail, ScoringMode};
use crate::wins::WinsTable;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points with thousands separators (12,345)
pub fn format_points(points: u64) -> String {
    let digits = points.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn points_column(entry: &RankedEntry) -> String {
    match entry.result.max {
        Some(max) => format!("{}/{}", format_points(entry.result.total), format_points(max)),
        None => format_points(entry.result.total),
    }
}

/// Format the pool as a ranked table: rank, points, player.
/// No headers. Rank column fits "999.", points column is right-aligned.
pub fn format_standings_table(ranked: &[RankedEntry], use_colors: bool) -> String {
    if ranked.is_empty() {
        return "No entries found.".to_string();
    }

    let term_width = get_terminal_width();
    let points_width = ranked
        .iter()
        .map(|r| points_column(r).len())
        .max()
        .unwrap_or(0)
        .max(6);
    let rank_width = 4;
    let separator = "  ";

    ranked
        .iter()
        .map(|r| {
            let rank_str = format!("{:>3}.", r.rank);
            let points_padded = format!("{:>width$}", points_column(r), width = points_width);

            let fixed_width = rank_width + 1 + points_width + separator.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&r.entry.display_name, width - fixed_width)
                }
                Some(_) => truncate_name(&r.entry.display_name, 20),
                None => r.entry.display_name.clone(),
            };

            if use_colors {
                let rank_colored = match r.rank {
                    1 => rank_str.yellow().bold().to_string(),
                    2 => rank_str.white().bold().to_string(),
                    3 => rank_str.red().to_string(),
                    _ => rank_str.dimmed().to_string(),
                };
                format!("{} {}{}{}", rank_colored, points_padded.bold(), separator, name)
            } else {
                format!("{} {}{}{}", rank_str, points_padded, separator, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the pool as tab-separated values for scripting
/// Columns: rank, points, name, submitted_at (no headers, no colors)
pub fn format_standings_tsv(ranked: &[RankedEntry]) -> String {
    ranked
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}",
                r.rank,
                r.result.total,
                r.entry.display_name,
                r.entry.submitted_at.to_rfc3339()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn detail_line(detail: &PerTeamDetail) -> String {
    match (detail.wins, detail.weight, detail.actual_rank) {
        (Some(wins), Some(weight), _) => format!("{} W x{} = {}", wins, weight, format_points(detail.points)),
        (_, _, Some(actual)) => format!("actual {:>2}  +{}", actual, detail.points),
        _ => format!("+{}", detail.points),
    }
}

/// Format one entry's full score breakdown (for `show`)
pub fn format_breakdown(ranked: &RankedEntry, roster: &Roster, use_colors: bool) -> String {
    let result = &ranked.result;
    let mut lines = Vec::new();

    let header = format!(
        "#{} {} ({} pts, {} scoring)",
        ranked.rank,
        ranked.entry.display_name,
        points_column(ranked),
        result.mode
    );
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });
    lines.push(format!(
        "  Submitted: {}",
        ranked.entry.submitted_at.format("%Y-%m-%d %H:%M UTC")
    ));

    for conference in Conference::ALL {
        lines.push(String::new());
        let heading = format!(
            "{}: {} pts",
            conference.label(),
            format_points(result.conference(conference))
        );
        lines.push(if use_colors {
            heading.cyan().to_string()
        } else {
            heading
        });

        for (i, team_id) in ranked.entry.picks.conference(conference).iter().enumerate() {
            let predicted_rank = i + 1;
            let detail = result
                .details(conference)
                .find(|d| d.predicted_rank == predicted_rank);
            let scored = match detail {
                Some(d) => detail_line(d),
                None => match result.mode {
                    ScoringMode::Weighted => "no wins data".to_string(),
                    ScoringMode::Distance => "not in final standings".to_string(),
                },
            };
            let scored = if use_colors && detail.is_none() {
                scored.dimmed().to_string()
            } else {
                scored
            };
            lines.push(format!(
                "  {:>2}. {:<3} {:<24} {}",
                predicted_rank,
                team_id,
                truncate_name(roster.team_name(team_id), 24),
                scored
            ));
        }
    }

    lines.join("\n")
}

/// "Last updated" line for a wins snapshot
pub fn format_last_updated(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match updated_at {
        Some(at) => format!(
            "Last updated: {} ({} ago)",
            at.format("%Y-%m-%d %H:%M UTC"),
            format_age(now - at)
        ),
        None => "Last updated: never".to_string(),
    }
}

/// Format the wins snapshot grouped by conference, most wins first
pub fn format_wins(table: &WinsTable, roster: &Roster, use_colors: bool) -> String {
    let mut lines = vec![format_last_updated(table.updated_at, Utc::now())];

    for conference in Conference::ALL {
        lines.push(String::new());
        lines.push(if use_colors {
            conference.label().cyan().to_string()
        } else {
            conference.label().to_string()
        });

        let mut teams: Vec<_> = roster
            .teams(conference)
            .iter()
            .map(|t| (t, table.get(t.id)))
            .collect();
        teams.sort_by(|a, b| {
            b.1.unwrap_or(0)
                .cmp(&a.1.unwrap_or(0))
                .then_with(|| a.0.id.cmp(b.0.id))
        });

        for (i, (team, wins)) in teams.into_iter().enumerate() {
            let wins = wins.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string());
            lines.push(format!("  {:>2}. {:<3} {:<24} {:>3}", i + 1, team.id, team.name, wins));
        }
    }

    lines.join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::Entry;
    use crate::league::Picks;
    use crate::pool::score_and_sort;

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::new(
                "Sam",
                Picks::new(
                    vec!["BOS".to_string(), "SEA".to_string(), "MIA".to_string()],
                    vec!["OKC".to_string()],
                ),
            ),
            Entry::new(
                "Riley",
                Picks::new(vec!["MIA".to_string()], Vec::new()),
            ),
        ]
    }

    fn sample_wins() -> WinsTable {
        WinsTable::from_raw([("BOS", 1200.0), ("MIA", 10.0), ("OKC", 5.0)], None)
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(290), "290");
        assert_eq!(format_points(1000), "1,000");
        assert_eq!(format_points(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Sam", 10), "Sam");
        assert_eq!(truncate_name("Alexandria Ocasio", 8), "Alexa...");
        assert_eq!(truncate_name("Alexandria", 2), "Al");
    }

    #[test]
    fn test_standings_table_empty() {
        assert_eq!(format_standings_table(&[], false), "No entries found.");
    }

    #[test]
    fn test_standings_table_rows() {
        let entries = sample_entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let ranked = score_and_sort(&refs, &sample_wins(), ScoringMode::Weighted, None).unwrap();

        let table = format_standings_table(&ranked, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1."));
        // 1200*3 + 10*1 + 5*1
        assert!(lines[0].contains("3,615"));
        assert!(lines[0].ends_with("Sam"));
        assert!(lines[1].ends_with("Riley"));
    }

    #[test]
    fn test_standings_tsv() {
        let entries = sample_entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let ranked = score_and_sort(&refs, &sample_wins(), ScoringMode::Weighted, None).unwrap();

        let tsv = format_standings_tsv(&ranked);
        let first: Vec<&str> = tsv.lines().next().unwrap().split('\t').collect();
        assert_eq!(first[0], "1");
        assert_eq!(first[1], "3615");
        assert_eq!(first[2], "Sam");
    }

    #[test]
    fn test_breakdown_marks_unscored_teams() {
        let entries = sample_entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let ranked = score_and_sort(&refs, &sample_wins(), ScoringMode::Weighted, None).unwrap();

        let text = format_breakdown(&ranked[0], &Roster::nba(), false);

        assert!(text.starts_with("#1 Sam (3,615 pts, weighted scoring)"));
        assert!(text.contains("Boston Celtics"));
        assert!(text.contains("1200 W x3 = 3,600"));
        assert!(text.contains("SEA"));
        assert!(text.contains("no wins data"));
        assert!(text.contains("Western Conference: 5 pts"));
    }

    #[test]
    fn test_breakdown_distance_mode() {
        let entries = sample_entries();
        let refs: Vec<&Entry> = entries.iter().collect();
        let actual = Picks::new(
            vec!["BOS".to_string(), "MIA".to_string()],
            vec!["OKC".to_string()],
        );
        let ranked =
            score_and_sort(&refs, &WinsTable::new(), ScoringMode::Distance, Some(&actual)).unwrap();

        // Sam: BOS exact 5, MIA 3 vs 2 -> 3, OKC exact 5
        assert_eq!(ranked[0].entry.display_name, "Sam");
        let text = format_breakdown(&ranked[0], &Roster::nba(), false);
        assert!(text.contains("13/15 pts"));
        assert!(text.contains("actual  2  +3"));
        assert!(text.contains("not in final standings"));
    }

    #[test]
    fn test_format_last_updated() {
        let now = Utc::now();
        assert_eq!(format_last_updated(None, now), "Last updated: never");
        let line = format_last_updated(Some(now - Duration::hours(3)), now);
        assert!(line.ends_with("(3h ago)"));
    }

    #[test]
    fn test_format_wins_orders_by_wins() {
        let table = sample_wins();
        let text = format_wins(&table, &Roster::nba(), false);
        let east_first = text
            .lines()
            .skip_while(|l| *l != "Eastern Conference")
            .nth(1)
            .unwrap();
        assert!(east_first.contains("BOS"));
        assert!(east_first.trim_end().ends_with("1200"));
        assert!(text.contains("Last updated: never"));
    }

    #[test]
    fn test_format_age_hours() {
        assert_eq!(format_age(Duration::hours(5)), "5h");
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age(Duration::days(3)), "3d");
    }

    #[test]
    fn test_format_age_weeks() {
        assert_eq!(format_age(Duration::weeks(2)), "2w");
    }

    #[test]
    fn test_format_age_now() {
        assert_eq!(format_age(Duration::seconds(30)), "now");
    }
}
