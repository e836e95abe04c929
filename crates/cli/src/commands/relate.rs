//! orgscope relate command

use crate::commands::EngineContext;
use clap::Args;
use orggraph::GraphStore;
use shared::Matricule;

#[derive(Debug, Args)]
pub struct RelateCommand {
    /// Agent matricule
    #[arg(short, long)]
    pub matricule: String,

    /// Unit the agent joins
    #[arg(short, long)]
    pub unit: String,

    /// Agent's rang within that unit
    #[arg(long)]
    pub rang: i32,
}

impl RelateCommand {
    pub fn run(&self, ctx: &mut EngineContext) -> anyhow::Result<()> {
        let matricule = Matricule::parse(&self.matricule)?;

        ctx.store
            .create_agent_unit_relationship(&matricule, &self.unit, self.rang)?;
        ctx.audit
            .log_relationship(matricule.as_str(), &self.unit, self.rang);

        println!(
            "✓ {} belongs to {} with rang {}",
            matricule, self.unit, self.rang
        );
        println!("  (cached decisions may stay stale until their TTL; use check --uncached)");

        let memberships = ctx.store.memberships_of(&matricule)?;
        for membership in &memberships {
            println!("  - {} (rang {})", membership.unit_id, membership.rang);
        }
        Ok(())
    }
}
