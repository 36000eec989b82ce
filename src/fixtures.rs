#[cfg(test)]
pub mod test {
    use crate::types::{Key, SettingsMap, ValueSpec};

    pub fn leaf(env_var: &str) -> ValueSpec {
        ValueSpec::leaf(env_var)
    }

    pub fn map<K: Into<Key>>(entries: impl IntoIterator<Item = (K, ValueSpec)>) -> ValueSpec {
        ValueSpec::composite(entries)
    }

    /// A typical Drupal mapping: database credentials, hash salt, trusted hosts.
    pub fn drupal_settings() -> SettingsMap {
        [
            (
                "databases",
                map([(
                    "default",
                    map([(
                        "default",
                        map([
                            ("database", leaf("DB_NAME")),
                            ("username", leaf("DB_USER")),
                            ("password", leaf("DB_PASS")),
                            ("host", leaf("DB_HOST")),
                        ]),
                    )]),
                )]),
            ),
            ("settings", map([("hash_salt", leaf("HASH_SALT"))])),
            (
                "trusted_hosts",
                map([(0i64, leaf("TRUSTED_HOST")), (1i64, leaf("TRUSTED_HOST_ALT"))]),
            ),
        ]
        .into_iter()
        .collect()
    }

    /// Expected generated tail for [`drupal_settings`] with default options.
    pub const DRUPAL_SETTINGS_PHP: &str = "/**
 * Content after this line was autogenerated by drupal-env-settings.
 */

/**
 * Load dynamic configuration from file outside of Drupal root.
 */
if (file_exists('../config.php')) {
  include_once '../config.php';
}

/**
 * Load settings from the environment.
 */
$databases['default']['default'] = [
  'database' => getenv('DB_NAME'),
  'username' => getenv('DB_USER'),
  'password' => getenv('DB_PASS'),
  'host' => getenv('DB_HOST'),
];
$settings['hash_salt'] = getenv('HASH_SALT');
$trusted_hosts = [
  0 => getenv('TRUSTED_HOST'),
  1 => getenv('TRUSTED_HOST_ALT'),
];
";

    /// A hand-written template in the style of Drupal's default.settings.php.
    pub const TEMPLATE: &str = r#"<?php

/**
 * @file
 * Drupal site-specific configuration file.
 */

$settings['config_sync_directory'] = '../config/sync';
$settings['update_free_access'] = FALSE;

if (file_exists($app_root . '/' . $site_path . '/settings.local.php')) {
  include $app_root . '/' . $site_path . '/settings.local.php';
}
"#;

    #[test]
    fn drupal_settings_has_three_entries() {
        let settings = drupal_settings();
        assert_eq!(settings.len(), 3);
        assert!(settings.get("databases").is_some());
    }
}
