//! orgscope check command

use crate::commands::EngineContext;
use clap::Args;
use shared::{ActorIdentity, EntityRef, Matricule};

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Actor role name
    #[arg(short, long)]
    pub role: String,

    /// Actor matricule
    #[arg(short, long)]
    pub matricule: String,

    /// Target entity id
    #[arg(long)]
    pub target_id: String,

    /// Target entity type (unit, agent, ...)
    #[arg(long)]
    pub target_type: String,

    /// Bypass the decision cache in both directions
    #[arg(long)]
    pub uncached: bool,

    /// Print the decision reason and hierarchy distance
    #[arg(long)]
    pub explain: bool,
}

impl CheckCommand {
    pub fn run(&self, ctx: &mut EngineContext) -> anyhow::Result<()> {
        let actor = ActorIdentity::new(Matricule::parse(&self.matricule)?, &self.role);
        let target = EntityRef::new(&self.target_id, &self.target_type);

        if self.explain {
            let explanation = ctx.engine.explain(&actor, &target)?;
            ctx.audit.log_decision(
                actor.matricule.as_str(),
                &self.target_id,
                explanation.allowed,
                Some(&explanation.reason.to_string()),
            );
            println!("{}", serde_json::to_string_pretty(&explanation)?);
            return Ok(());
        }

        let allowed = if self.uncached {
            ctx.engine.can_view_uncached(&actor, &target)?
        } else {
            ctx.engine.can_view(&actor, &target)?
        };

        ctx.audit
            .log_decision(actor.matricule.as_str(), &self.target_id, allowed, None);

        if allowed {
            println!("visible");
        } else {
            println!("not visible");
        }
        Ok(())
    }
}
