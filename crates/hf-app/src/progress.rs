#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Validating,
    Compiling,
    Simulating,
    Summarizing,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::Validating => "validating",
            RunStage::Compiling => "compiling",
            RunStage::Simulating => "simulating",
            RunStage::Summarizing => "summarizing",
            RunStage::SavingResults => "saving",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationProgress {
    pub step: usize,
    pub steps: usize,
    pub sim_time_s: f64,
    pub fraction_complete: f64,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub scenario: String,
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub simulation: Option<SimulationProgress>,
}
