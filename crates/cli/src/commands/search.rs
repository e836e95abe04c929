//! orgscope search command

use crate::commands::EngineContext;
use clap::Args;
use shared::{ActorIdentity, Matricule};

#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Actor role name
    #[arg(short, long)]
    pub role: String,

    /// Actor matricule
    #[arg(short, long)]
    pub matricule: String,

    /// Ministry to search
    #[arg(long)]
    pub ministere: String,
}

impl SearchCommand {
    pub fn run(&self, ctx: &mut EngineContext) -> anyhow::Result<()> {
        let actor = ActorIdentity::new(Matricule::parse(&self.matricule)?, &self.role);

        let units = ctx.engine.search_visible_units(&actor, &self.ministere)?;
        ctx.audit
            .log_search(actor.matricule.as_str(), &self.ministere, units.len());

        if units.is_empty() {
            println!("No visible units in '{}'", self.ministere);
            return Ok(());
        }

        for unit in &units {
            println!("{}  {} ({})", unit.id, unit.name, unit.ministere);
        }
        Ok(())
    }
}
