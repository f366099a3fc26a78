//! Integration tests for tl-output.

use tempfile::TempDir;

use tl_core::{Action, AgentId, PerAgent, State};
use tl_sim::{AgentSummary, EpisodeHistory, EpisodeObserver, EpisodeSummary};

use crate::{CsvHistoryWriter, HistoryObserver, OutputWriter, export_history};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn summary(episode: u32) -> EpisodeSummary {
    let agent = |n: f64| AgentSummary { neg_reward: -n, waiting_time: 10.0 * n, avg_queue: n / 2.0 };
    EpisodeSummary {
        episode,
        agents: PerAgent::from_vec(vec![agent(1.0), agent(2.0)]),
        total:  agent(3.0),
    }
}

fn read(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    let rows = rdr.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

// ── CsvHistoryWriter ──────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvHistoryWriter::new(&dir.path().join("out")).unwrap();
        w.finish().unwrap();

        let (h, _) = read(&dir.path().join("out/episodes.csv"));
        assert_eq!(h, ["episode", "agent", "neg_reward", "cumulative_wait", "avg_queue"]);
        let (h, _) = read(&dir.path().join("out/decisions.csv"));
        assert_eq!(h, ["episode", "step", "agent", "action", "reward", "occupied"]);
        let (h, _) = read(&dir.path().join("out/steps.csv"));
        assert_eq!(h, ["episode", "step", "agent", "queue"]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvHistoryWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── HistoryObserver ───────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    fn observed(dir: &TempDir, record_steps: bool) {
        let writer = CsvHistoryWriter::new(dir.path()).unwrap();
        let mut obs = HistoryObserver::new(writer).record_steps(record_steps);

        obs.on_episode_start(4, 0.5);
        let mut state = State::empty(80);
        state.occupy(20);
        obs.on_decision(0, AgentId::FIRST, &state, Action(2), -1.5);
        obs.on_decision(0, AgentId::SECOND, &State::empty(80), Action(0), 0.0);
        obs.on_step(1, &PerAgent::from_vec(vec![3.0, 0.0]));
        obs.on_step(2, &PerAgent::from_vec(vec![2.0, 1.0]));
        obs.on_episode_end(&summary(4));
        obs.finish();
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn decisions_written() {
        let dir = tmp();
        observed(&dir, true);
        let (_, rows) = read(&dir.path().join("decisions.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4"); // episode
        assert_eq!(&rows[0][2], "1"); // agent
        assert_eq!(&rows[0][3], "2"); // action
        assert_eq!(&rows[0][4], "-1.5");
        assert_eq!(&rows[0][5], "1"); // occupied
        assert_eq!(&rows[1][2], "2");
    }

    #[test]
    fn steps_written_per_agent() {
        let dir = tmp();
        observed(&dir, true);
        let (_, rows) = read(&dir.path().join("steps.csv"));
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[2][1], "2"); // step
        assert_eq!(&rows[2][3], "2"); // queue of agent 1
    }

    #[test]
    fn steps_can_be_disabled() {
        let dir = tmp();
        observed(&dir, false);
        let (_, rows) = read(&dir.path().join("steps.csv"));
        assert!(rows.is_empty());
    }

    #[test]
    fn episode_rows_include_total() {
        let dir = tmp();
        observed(&dir, false);
        let (_, rows) = read(&dir.path().join("episodes.csv"));
        let agents: Vec<&str> = rows.iter().map(|r| &r[1]).collect();
        assert_eq!(agents, ["1", "2", "total"]);
        assert_eq!(&rows[2][2], "-3");
        assert_eq!(&rows[2][3], "30");
        assert_eq!(&rows[2][4], "1.5");
    }
}

// ── export_history ────────────────────────────────────────────────────────────

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn one_row_per_episode_three_columns_per_series() {
        let dir = tmp();
        let mut history = EpisodeHistory::new(2);
        history.push(&summary(0));
        history.push(&summary(1));

        let path = dir.path().join("nested/history.csv");
        export_history(&path, &history).unwrap();

        let (h, rows) = read(&path);
        assert_eq!(h.len(), 1 + 3 * 3);
        assert_eq!(h[1], "agent1_reward");
        assert_eq!(h[9], "total_avg_queue");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][4], "-2"); // agent2_reward
    }

    #[test]
    fn empty_history_writes_header_only() {
        let dir = tmp();
        let path = dir.path().join("history.csv");
        export_history(&path, &EpisodeHistory::new(1)).unwrap();
        let (h, rows) = read(&path);
        assert_eq!(h.len(), 7);
        assert!(rows.is_empty());
    }
}
