//! Plain data row types written by output backends.

/// One agent's kinematic state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub x:        f32,
    pub y:        f32,
    pub z:        f32,
    pub vx:       f32,
    pub vy:       f32,
    pub vz:       f32,
    pub speed:    f32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub sim_time_secs: f64,
    pub agent_count:   u64,
    pub mean_speed:    f32,
    pub mean_visible:  f32,
    pub avoiding:      u64,
}

/// One agent's steering breakdown at a snapshot tick.
///
/// `clear_*` are zero when the forward probe was clear (`avoiding == false`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringForcesRow {
    pub agent_id:     u32,
    pub tick:         u64,
    pub cohesion_x:   f32,
    pub cohesion_y:   f32,
    pub cohesion_z:   f32,
    pub alignment_x:  f32,
    pub alignment_y:  f32,
    pub alignment_z:  f32,
    pub separation_x: f32,
    pub separation_y: f32,
    pub separation_z: f32,
    pub avoiding:     bool,
    pub clear_x:      f32,
    pub clear_y:      f32,
    pub clear_z:      f32,
    pub separating:   u32,
}
