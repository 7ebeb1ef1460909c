use serde::Deserialize;

use crate::core;
use crate::server::tcp;

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub server: tcp::Config,
    #[serde(default)]
    pub backend: core::Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_from_yaml() {
        let yaml = r#"
server:
  listen_host: 0.0.0.0
  listen_port: "7539"
  disable_tls: true
backend:
  users:
    - username: kurier
      password: kurier
  routes:
    - id: 1
      date: 2025-12-01
      points:
        - lat: 49.8225
          lng: 19.0444
          address: "Bielsko-Biała, ul. Cyniarska 11"
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.backend.users.len(), 1);
        let routes = config.backend.routes.unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].points[0].additional_info, None);
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        // Default principals mirror the demo credentials.
        assert_eq!(config.backend.users.len(), 2);
        assert!(config.backend.routes.is_none());
    }
}
