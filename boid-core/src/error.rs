use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("no position outside every obstacle found after {attempts} attempts")]
    NoFreeSpace { attempts: u32 },

    #[error("canvas must have a positive finite size, got {width}x{height}")]
    EmptyCanvas { width: f32, height: f32 },
}
