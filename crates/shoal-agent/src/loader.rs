//! Population CSV loader.
//!
//! # CSV format
//!
//! One row per agent; row order becomes `AgentId` order.
//!
//! ```csv
//! x,y,z,fx,fy,fz,vx,vy,vz,perception_radius,max_perception_angle_deg,separation_radius,avoidance_range,min_speed,max_speed
//! 0,0,0,0,0,1,0,0,3,5,120,1.5,4,2,5
//! 2,0,1,0,0,1,0,0,3,5,120,1.5,4,2,5
//! ```
//!
//! Every row is validated; the first invalid row fails the whole load.

use std::io::Read;
use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use crate::{AgentError, AgentInit, AgentResult, AgentTunables};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PopulationRecord {
    x:  f32,
    y:  f32,
    z:  f32,
    fx: f32,
    fy: f32,
    fz: f32,
    vx: f32,
    vy: f32,
    vz: f32,
    perception_radius:        f32,
    max_perception_angle_deg: f32,
    separation_radius:        f32,
    avoidance_range:          f32,
    min_speed:                f32,
    max_speed:                f32,
}

impl PopulationRecord {
    fn tunables(&self) -> AgentTunables {
        AgentTunables {
            perception_radius:        self.perception_radius,
            max_perception_angle_deg: self.max_perception_angle_deg,
            separation_radius:        self.separation_radius,
            avoidance_range:          self.avoidance_range,
            min_speed:                self.min_speed,
            max_speed:                self.max_speed,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load agents from a CSV file.
pub fn load_population_csv(path: &Path) -> AgentResult<Vec<AgentInit>> {
    let file = std::fs::File::open(path)?;
    load_population_reader(file)
}

/// Like [`load_population_csv`] but accepts any `Read` source.
pub fn load_population_reader<R: Read>(reader: R) -> AgentResult<Vec<AgentInit>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut inits = Vec::new();

    for (row, result) in csv_reader.deserialize::<PopulationRecord>().enumerate() {
        let r = result.map_err(|e| AgentError::Parse(format!("row {row}: {e}")))?;
        let tunables = r.tunables();
        tunables
            .validate()
            .map_err(|e| AgentError::Parse(format!("row {row}: {e}")))?;

        inits.push(AgentInit {
            position: Vec3::new(r.x, r.y, r.z),
            forward:  Vec3::new(r.fx, r.fy, r.fz),
            velocity: Vec3::new(r.vx, r.vy, r.vz),
            tunables,
        });
    }

    log::debug!("loaded {} agents from population CSV", inits.len());
    Ok(inits)
}
