use std::collections::HashSet;

use anyhow::Result;
use platform_db::{Employee, EmployeeRepository, SeaEmployeeRepository};
use suite_tests::migrated_pool;

fn employee(first: &str, last: &str, mail: &str, password: &str) -> Employee {
    Employee {
        id: None,
        first_name: Some(first.into()),
        last_name: Some(last.into()),
        mail: Some(mail.into()),
        password: Some(password.into()),
    }
}

#[tokio::test]
async fn saved_employee_reads_back_identically() -> Result<()> {
    let repo = SeaEmployeeRepository::new(migrated_pool().await?);
    let jane = employee("Jane", "Doe", "jane@x.com", "p");

    let saved = repo.save(jane.clone()).await?;
    let id = saved.id.expect("insert assigns an id");
    let loaded = repo.get(id).await?.expect("row exists");

    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.first_name.as_deref(), Some("Jane"));
    assert_eq!(loaded.last_name.as_deref(), Some("Doe"));
    assert_eq!(loaded.mail.as_deref(), Some("jane@x.com"));
    assert_eq!(loaded.password.as_deref(), Some("p"));
    Ok(())
}

#[tokio::test]
async fn deleted_employee_is_gone() -> Result<()> {
    let repo = SeaEmployeeRepository::new(migrated_pool().await?);
    let id = repo
        .save(employee("Tmp", "Worker", "tmp@x.com", "p"))
        .await?
        .id
        .expect("id");

    assert!(repo.delete(id).await?);
    assert!(repo.get(id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn list_all_returns_every_live_record() -> Result<()> {
    let repo = SeaEmployeeRepository::new(migrated_pool().await?);
    let mut kept = HashSet::new();
    for (first, mail) in [("Ann", "ann@x.com"), ("Bob", "bob@x.com"), ("Cy", "cy@x.com")] {
        kept.insert(repo.save(employee(first, "Test", mail, "p")).await?.id);
    }
    let dropped = repo
        .save(employee("Dee", "Test", "dee@x.com", "p"))
        .await?
        .id
        .expect("id");
    repo.delete(dropped).await?;

    let listed: HashSet<_> = repo.list_all().await?.into_iter().map(|e| e.id).collect();
    assert!(kept.is_subset(&listed));
    assert!(!listed.contains(&Some(dropped)));
    Ok(())
}

#[tokio::test]
async fn untouched_columns_may_stay_empty() -> Result<()> {
    let repo = SeaEmployeeRepository::new(migrated_pool().await?);
    let saved = repo
        .save(Employee {
            mail: Some("only-mail@x.com".into()),
            ..Employee::default()
        })
        .await?;
    let loaded = repo.get(saved.id.expect("id")).await?.expect("row");
    assert_eq!(loaded.first_name, None);
    assert_eq!(loaded.password, None);
    Ok(())
}
