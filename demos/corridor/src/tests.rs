//! Tests for the corridor demo's simulation, routes and model.

use std::path::{Path, PathBuf};

use tl_core::{AgentId, ControlConfig, ControlMode, LayoutKind, State, TlError};
use tl_policy::{EpsilonSchedule, LoadModel, ValueModel};
use tl_sim::{NoopObserver, OrchestratorBuilder, RouteSource, TrafficSim};

use crate::DemoConfig;
use crate::model::LinearModel;
use crate::routes::{Arrival, SeededRoutes};
use crate::toy_sim::CorridorSim;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn arrival(id: &str, depart: u64, road: &str, lane: u8) -> Arrival {
    Arrival { id: id.to_owned(), depart, road: road.to_owned(), lane }
}

fn write_routes(dir: &Path, arrivals: &[Arrival]) -> PathBuf {
    let path = dir.join("routes.json");
    std::fs::write(&path, serde_json::to_string(arrivals).unwrap()).unwrap();
    path
}

fn sim_with(dir: &Path, arrivals: &[Arrival]) -> CorridorSim {
    let mut sim = CorridorSim::new();
    sim.reset(&write_routes(dir, arrivals)).unwrap();
    sim
}

fn routes(dir: &Path, vehicles: usize, max_steps: u64) -> SeededRoutes {
    SeededRoutes {
        dir: dir.to_path_buf(),
        roads: vec!["N2TL".into(), "E2TL".into(), "-E0".into()],
        vehicles,
        max_steps,
    }
}

fn small_config(layout: LayoutKind, mode: ControlMode) -> ControlConfig {
    ControlConfig {
        layout,
        mode,
        max_steps: 300,
        training_epochs: 3,
        batch_size: 16,
        memory_size_min: 4,
        memory_size_max: 500,
        fixed_phase_duration: 20,
        ..ControlConfig::default()
    }
}

// ── CorridorSim ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod toy_sim_tests {
    use super::*;

    #[test]
    fn red_light_holds_vehicle_at_stop_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim_with(dir.path(), &[arrival("a", 0, "N2TL", 0)]);
        sim.step(100).unwrap();

        assert_eq!(sim.vehicle_lane_position("a").unwrap(), 749.0);
        assert_eq!(sim.vehicle_speed("a").unwrap(), 0.0);
        // Reaches the line at step 54, halted for the remaining 46.
        assert_eq!(sim.accumulated_waiting_time("a").unwrap(), 46.0);
        assert_eq!(sim.halting_count("N2TL").unwrap(), 1);
        assert_eq!(sim.halting_count("S2TL").unwrap(), 0);
    }

    #[test]
    fn green_movement_leaves_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim_with(dir.path(), &[arrival("a", 0, "N2TL", 1)]);
        sim.set_phase("TL", 0).unwrap();
        sim.step(60).unwrap();
        assert!(sim.vehicle_ids().unwrap().is_empty());
    }

    #[test]
    fn yellow_and_other_movements_stay_red() {
        let dir = tempfile::tempdir().unwrap();
        let arrivals = [arrival("through", 0, "N2TL", 0), arrival("left", 0, "S2TL", 3)];

        let mut sim = sim_with(dir.path(), &arrivals);
        sim.set_phase("TL", 1).unwrap(); // yellow after NS through
        sim.step(80).unwrap();
        assert_eq!(sim.vehicle_ids().unwrap().len(), 2);

        sim.set_phase("TL", 0).unwrap(); // NS through: the left-turn lane waits
        sim.step(5).unwrap();
        assert_eq!(sim.vehicle_ids().unwrap(), vec!["left".to_owned()]);

        sim.set_phase("TL", 2).unwrap(); // NS left
        sim.step(5).unwrap();
        assert!(sim.vehicle_ids().unwrap().is_empty());
    }

    #[test]
    fn follower_keeps_its_gap() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim_with(dir.path(), &[arrival("a", 0, "W2TL", 2), arrival("b", 5, "W2TL", 2)]);
        sim.step(200).unwrap();
        assert_eq!(sim.vehicle_lane_position("a").unwrap(), 749.0);
        assert_eq!(sim.vehicle_lane_position("b").unwrap(), 741.5);
        assert_eq!(sim.halting_count("W2TL").unwrap(), 2);
    }

    #[test]
    fn lanes_queue_independently() {
        let dir = tempfile::tempdir().unwrap();
        let arrivals = [
            arrival("a", 0, "N2TL", 0),
            arrival("b", 5, "N2TL", 1),
            arrival("c", 5, "S2TL", 0),
            arrival("d", 9, "N2TL", 0),
        ];
        let mut sim = sim_with(dir.path(), &arrivals);
        sim.step(200).unwrap();
        assert_eq!(sim.vehicle_lane_position("a").unwrap(), 749.0);
        assert_eq!(sim.vehicle_lane_position("b").unwrap(), 749.0);
        assert_eq!(sim.vehicle_lane_position("c").unwrap(), 749.0);
        assert_eq!(sim.vehicle_lane_position("d").unwrap(), 741.5);
    }

    #[test]
    fn lane_id_carries_the_lane_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim_with(dir.path(), &[arrival("a", 0, "-E3", 3)]);
        sim.step(1).unwrap();
        assert_eq!(sim.vehicle_lane_id("a").unwrap(), "-E3_3");
        assert_eq!(sim.vehicle_road_id("a").unwrap(), "-E3");
    }

    #[test]
    fn unknown_ids_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim_with(dir.path(), &[]);
        assert!(matches!(sim.set_phase("XX", 0), Err(TlError::Simulation(_))));
        assert!(matches!(sim.vehicle_speed("ghost"), Err(TlError::Simulation(_))));
    }

    #[test]
    fn missing_route_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = CorridorSim::new();
        assert!(sim.reset(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn close_empties_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim_with(dir.path(), &[arrival("a", 0, "N2TL", 0)]);
        sim.step(3).unwrap();
        sim.close().unwrap();
        assert!(sim.vehicle_ids().unwrap().is_empty());
    }
}

// ── SeededRoutes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod routes_tests {
    use super::*;

    #[test]
    fn same_seed_same_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let r = routes(dir.path(), 200, 1_000);
        assert_eq!(r.schedule(7), r.schedule(7));
        assert_ne!(r.schedule(7), r.schedule(8));
    }

    #[test]
    fn schedule_spans_the_episode() {
        let dir = tempfile::tempdir().unwrap();
        let schedule = routes(dir.path(), 300, 1_000).schedule(3);

        assert_eq!(schedule.len(), 300);
        assert_eq!(schedule.first().unwrap().depart, 0);
        assert_eq!(schedule.last().unwrap().depart, 999);
        assert!(schedule.windows(2).all(|w| w[0].depart <= w[1].depart));
        assert!(schedule.iter().all(|a| a.lane <= 3));
        assert!(schedule.iter().any(|a| a.lane == 3));
        assert!(schedule.iter().all(|a| ["N2TL", "E2TL", "-E0"].contains(&a.road.as_str())));
    }

    #[test]
    fn generated_file_loads_into_the_sim() {
        let dir = tempfile::tempdir().unwrap();
        let mut r = routes(dir.path(), 20, 100);
        let path = r.generate(11).unwrap();
        assert!(path.ends_with("routes_11.json"));

        let mut sim = CorridorSim::new();
        sim.reset(&path).unwrap();
        sim.step(100).unwrap();
        assert_eq!(sim.vehicle_ids().unwrap().len(), 20);
    }
}

// ── LinearModel ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod model_tests {
    use super::*;

    fn state(cells: &[usize]) -> State {
        let mut s = State::empty(8);
        for &c in cells {
            s.occupy(c);
        }
        s
    }

    #[test]
    fn fresh_model_predicts_zero() {
        let m = LinearModel::new(2, 8, 4);
        assert_eq!(m.predict_one(AgentId::SECOND, &state(&[1, 5])).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn training_moves_towards_target() {
        let mut m = LinearModel::new(1, 8, 4).with_learning_rate(0.1);
        let s = state(&[2]);
        let target = vec![1.0, 0.0, 0.0, -1.0];
        for _ in 0..50 {
            m.train_batch(AgentId::FIRST, &[&s], &[target.clone()]).unwrap();
        }
        let q = m.predict_one(AgentId::FIRST, &s).unwrap();
        assert!((q[0] - 1.0).abs() < 0.05);
        assert!((q[3] + 1.0).abs() < 0.05);
        assert!(q[1].abs() < 1e-9);
    }

    #[test]
    fn agents_train_independently() {
        let mut m = LinearModel::new(2, 8, 4).with_learning_rate(0.5);
        m.train_batch(AgentId::FIRST, &[&state(&[0])], &[vec![1.0; 4]]).unwrap();
        assert_eq!(m.predict_one(AgentId::SECOND, &state(&[0])).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn wrong_state_length_is_a_model_error() {
        let m = LinearModel::new(1, 8, 4);
        assert!(matches!(m.predict_one(AgentId::FIRST, &State::empty(9)), Err(TlError::Model(_))));
        assert!(matches!(m.predict_one(AgentId::SECOND, &State::empty(8)), Err(TlError::UnknownAgent(_))));
    }

    #[test]
    fn save_then_load_restores_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = LinearModel::new(2, 8, 4).with_learning_rate(0.2);
        m.train_batch(AgentId::SECOND, &[&state(&[3, 4])], &[vec![2.0, 1.0, 0.0, 3.0]]).unwrap();
        m.save(dir.path()).unwrap();
        assert!(dir.path().join("model_1.json").is_file());
        assert!(dir.path().join("model_2.json").is_file());

        let loaded = LinearModel::load(dir.path()).unwrap();
        assert_eq!(loaded.agent_count(), 2);
        let s = state(&[3, 4]);
        let before = m.predict_one(AgentId::SECOND, &s).unwrap();
        let after = loaded.predict_one(AgentId::SECOND, &s).unwrap();
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!(before[3] > 0.0);
    }

    #[test]
    fn empty_directory_is_model_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(LinearModel::load(dir.path()), Err(TlError::ModelNotFound(_))));
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod session_tests {
    use super::*;

    #[test]
    fn bundled_config_parses() {
        let config: DemoConfig = serde_json::from_str(include_str!("../corridor.json")).unwrap();
        assert_eq!(config.control.layout, LayoutKind::DualIndependent);
        assert_eq!(config.control.max_steps, 5_400);
        assert_eq!(config.total_episodes, 100);
        assert_eq!(config.model_dir, PathBuf::from("models/model_1"));
        config.control.validate().unwrap();
    }

    #[test]
    fn short_training_session_fills_memory_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(LayoutKind::DualIndependent, ControlMode::Training);
        let model = LinearModel::new(2, config.num_states, config.num_actions);
        let mut orch = OrchestratorBuilder::new(config, CorridorSim::new(), routes(dir.path(), 60, 300), model)
            .build()
            .unwrap();

        orch.run_training_session(EpsilonSchedule::Linear { total_episodes: 2 }, 2, &mut NoopObserver)
            .unwrap();

        assert_eq!(orch.history().episodes(), 2);
        assert!(orch.memory().sizes().iter().all(|&n| n > 0));
        assert!(orch.history().total.cumulative_wait.iter().all(|&w| w >= 0.0));
    }

    #[test]
    fn cyclic_baseline_runs_single_junction() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(LayoutKind::Single, ControlMode::CyclicBaseline);
        let model = LinearModel::new(1, config.num_states, config.num_actions);
        let mut orch = OrchestratorBuilder::new(config, CorridorSim::new(), routes(dir.path(), 40, 300), model)
            .build()
            .unwrap();

        let report = orch.run_episode(0, 0.0, &mut NoopObserver).unwrap();
        assert_eq!(report.summary.agents.len(), 1);
        assert_eq!(orch.memory().sizes(), vec![0]);
    }
}
