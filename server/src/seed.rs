use anyhow::{Context, Result};
use platform_db::{Employee, EmployeeRepository};
use tracing::info;

const DEMO_EMPLOYEES: [(&str, &str, &str); 3] = [
    ("Ada", "Lovelace", "ada.lovelace@example.test"),
    ("Grace", "Hopper", "grace.hopper@example.test"),
    ("Alan", "Turing", "alan.turing@example.test"),
];

const DEMO_PASSWORD: &str = "changeme";

/// Insert the demo employees when the table is empty. Returns how many rows
/// were written.
pub async fn seed_demo_employees(repo: &dyn EmployeeRepository) -> Result<usize> {
    let existing = repo.list_all().await.context("failed to list employees")?;
    if !existing.is_empty() {
        info!(count = existing.len(), "employees already present; skipping seed");
        return Ok(0);
    }

    let password = platform_authn::hash_password(DEMO_PASSWORD)?;
    for (first_name, last_name, mail) in DEMO_EMPLOYEES {
        repo.save(Employee {
            id: None,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            mail: Some(mail.to_string()),
            password: Some(password.clone()),
        })
        .await
        .with_context(|| format!("failed to seed {mail}"))?;
    }
    info!(count = DEMO_EMPLOYEES.len(), "demo employees seeded");
    Ok(DEMO_EMPLOYEES.len())
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use platform_db::{DatabaseSettings, SeaEmployeeRepository, connect};

    use super::*;

    #[tokio::test]
    async fn seeding_runs_once() {
        let pool = connect(&DatabaseSettings::new("sqlite::memory:"))
            .await
            .unwrap();
        Migrator::up(&pool, None).await.unwrap();
        let repo = SeaEmployeeRepository::new(pool);

        assert_eq!(seed_demo_employees(&repo).await.unwrap(), 3);
        assert_eq!(seed_demo_employees(&repo).await.unwrap(), 0);
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }
}
