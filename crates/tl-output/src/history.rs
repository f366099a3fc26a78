//! One-shot export of an [`EpisodeHistory`] as a wide CSV table.

use std::path::Path;

use csv::Writer;

use tl_sim::{AgentHistory, EpisodeHistory};

use crate::OutputResult;

/// Write `history` to `path`: one row per episode, three columns per agent
/// (`agent{n}_reward`, `agent{n}_cumulative_wait`, `agent{n}_avg_queue`)
/// followed by the same three for the total.
pub fn export_history(path: &Path, history: &EpisodeHistory) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut series: Vec<(String, &AgentHistory)> = history
        .agents
        .iter()
        .map(|(agent, h)| (format!("agent{}", agent.0), h))
        .collect();
    series.push(("total".to_owned(), &history.total));

    let mut w = Writer::from_path(path)?;
    let mut header = vec!["episode".to_owned()];
    for (name, _) in &series {
        header.push(format!("{name}_reward"));
        header.push(format!("{name}_cumulative_wait"));
        header.push(format!("{name}_avg_queue"));
    }
    w.write_record(&header)?;

    for episode in 0..history.episodes() {
        let mut record = vec![episode.to_string()];
        for (_, h) in &series {
            for column in [&h.reward, &h.cumulative_wait, &h.avg_queue] {
                record.push(column.get(episode).map_or_else(String::new, f64::to_string));
            }
        }
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}
