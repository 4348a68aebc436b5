use gormgen_core::{
    descriptor::{MessageDescriptor, OptionValue},
    Error, Result,
};

/// Declared storage intent of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOptions {
    /// True if the message participates in generation
    pub ormable: bool,

    /// Explicit table name
    pub table: Option<String>,
}

impl MessageOptions {
    /// Reads the message-level options. A message without any option
    /// resolves to the default value.
    pub fn resolve(message: &MessageDescriptor) -> Result<MessageOptions> {
        let mut options = MessageOptions::default();

        for (key, value) in message.options.iter() {
            match key {
                "ormable" => {
                    options.ormable = expect_bool(message, key, value)?;
                }
                "table" => {
                    let table = value.as_str().ok_or_else(|| {
                        Error::invalid_option(
                            &message.name,
                            None,
                            key,
                            format!("expected string, found {}", value.type_name()),
                        )
                    })?;

                    if table.is_empty() {
                        return Err(Error::invalid_option(
                            &message.name,
                            None,
                            key,
                            "table name must not be empty",
                        ));
                    }

                    options.table = Some(table.to_string());
                }
                _ => {
                    log::debug!("ignoring option `{key}` on message `{}`", message.name);
                }
            }
        }

        Ok(options)
    }
}

fn expect_bool(message: &MessageDescriptor, key: &str, value: &OptionValue) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        Error::invalid_option(
            &message.name,
            None,
            key,
            format!("expected bool, found {}", value.type_name()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gormgen_core::descriptor::Options;

    fn message(options: Options) -> MessageDescriptor {
        MessageDescriptor {
            name: "User".into(),
            options,
            ..Default::default()
        }
    }

    #[test]
    fn no_options_resolve_to_default() {
        let options = MessageOptions::resolve(&message(Options::new())).unwrap();
        assert_eq!(options, MessageOptions::default());
    }

    #[test]
    fn ormable_and_table() {
        let options = MessageOptions::resolve(&message(
            Options::new().with("ormable", true).with("table", "app_users"),
        ))
        .unwrap();

        assert!(options.ormable);
        assert_eq!(options.table.as_deref(), Some("app_users"));
    }

    #[test]
    fn mistyped_ormable_is_rejected() {
        let err = MessageOptions::resolve(&message(Options::new().with("ormable", "yes")))
            .unwrap_err();
        assert!(err.is_invalid_option());
    }
}
