use dotenvy;

#[derive(Debug)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub db_url: String,
    pub jwt_secret: String,
    pub listen_port: u16,
    pub is_development: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_url = std::env::var("DB_URL").expect("Missing DB_URL in env");

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");

        let listen_port: u16 = std::env::var("LISTEN_PORT")
            .unwrap_or("8080".to_string())
            .parse()
            .expect("LISTEN_PORT should be a number");

        let is_development = std::env::var("DEVELOPMENT")
            .unwrap_or("false".to_string())
            .eq("true");

        AppConfig {
            db_namespace,
            db_database,
            db_username,
            db_password,
            db_url,
            jwt_secret,
            listen_port,
            is_development,
        }
    }
}
