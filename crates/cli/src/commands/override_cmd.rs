//! orgscope override command

use crate::commands::EngineContext;
use clap::Args;
use shared::{VisibilityLevel, VisibilityRecord};

#[derive(Debug, Args)]
pub struct OverrideCommand {
    /// Entity the override applies to
    #[arg(long)]
    pub entity_id: String,

    /// Entity type (unit, agent, ...)
    #[arg(long)]
    pub entity_type: String,

    /// Visibility level: public, private or restricted
    #[arg(short, long)]
    pub level: String,

    /// Matricule of the agent recording the override
    #[arg(long)]
    pub by: String,
}

impl OverrideCommand {
    pub fn run(&self, ctx: &mut EngineContext) -> anyhow::Result<()> {
        let level: VisibilityLevel = self.level.parse()?;
        let record =
            VisibilityRecord::new(&self.entity_id, &self.entity_type, level, &self.by)?;

        ctx.engine.record_override(record)?;
        ctx.audit
            .log_override(&self.by, &self.entity_id, &level.to_string());

        println!("✓ {} is now {}", self.entity_id, level);
        Ok(())
    }
}
