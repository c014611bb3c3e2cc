use crate::db::connection::{init_db, Database};
use crate::domain::conditions::ConditionGrade;
use crate::domain::phone::NewPhone;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

/// Initialize a fresh test DB with the production schema, on a path
/// unique to this process and call so tests never share state.
pub fn init_test_db() -> Database {
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "phone_resale_test_{}_{n}.sqlite",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy().to_string());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn sample_phone(model: &str, condition: ConditionGrade, base_price: f64) -> NewPhone {
    NewPhone {
        model_name: model.to_string(),
        brand: "Acme".to_string(),
        condition,
        storage: "128GB".to_string(),
        color: "Black".to_string(),
        stock_quantity: 1,
        base_price,
        specifications: String::new(),
        tags: String::new(),
    }
}
