use sqlx::MySqlPool;
use tracing::info;

// Identity columns compare byte for byte, matching the in-memory store.
pub(crate) const CREATE_EMPLOYEES: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
        employee_id VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        full_name VARCHAR(255) NOT NULL,
        email VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        department VARCHAR(255) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        PRIMARY KEY (id),
        UNIQUE KEY uq_employees_employee_id (employee_id),
        UNIQUE KEY uq_employees_email (email)
    ) DEFAULT CHARSET = utf8mb4
"#;

pub(crate) const CREATE_ATTENDANCE: &str = r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
        employee_id VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
        date DATE NOT NULL,
        status VARCHAR(16) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        PRIMARY KEY (id),
        UNIQUE KEY uq_attendance_employee_date (employee_id, date)
    ) DEFAULT CHARSET = utf8mb4
"#;

pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPool::connect(database_url).await
}

/// Create the two tables if they are missing.
///
/// Attendance has no foreign key to employees. Existence is checked by the
/// ledger at write time and rows are removed by the registry's cascade.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_EMPLOYEES).execute(pool).await?;
    sqlx::query(CREATE_ATTENDANCE).execute(pool).await?;

    info!("Database schema ready");
    Ok(())
}
