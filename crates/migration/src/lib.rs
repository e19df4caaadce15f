pub use sea_orm_migration::prelude::*;

mod m20210921_081800_init;
mod m20211021_120000_fire_id;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20210921_081800_init::Migration),
            Box::new(m20211021_120000_fire_id::Migration),
        ]
    }
}
