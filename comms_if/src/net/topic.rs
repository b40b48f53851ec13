//! # Topic framing
//!
//! Messages published over PUB/SUB sockets are framed as `"<topic> <json>"`. The topic prefix is
//! what subscribers filter on with `set_subscribe()`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{de::DeserializeOwned, Serialize};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A message which is published on a fixed topic.
pub trait TopicMessage: Serialize + DeserializeOwned {
    /// The topic name, which must not contain whitespace.
    const TOPIC: &'static str;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum TopicError {
    #[error("Frame has no topic separator")]
    MissingTopic,

    #[error("Expected topic \"{expected}\", found \"{found}\"")]
    WrongTopic {
        expected: &'static str,
        found: String,
    },

    #[error("Could not serialize the message: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not deserialize the message: {0}")]
    DeserializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Encode a message into a topic frame.
pub fn encode<T: TopicMessage>(msg: &T) -> Result<String, TopicError> {
    let payload = serde_json::to_string(msg).map_err(TopicError::SerializationError)?;

    Ok(format!("{} {}", T::TOPIC, payload))
}

/// Decode a topic frame into a message, checking that the topic matches.
pub fn decode<T: TopicMessage>(frame: &str) -> Result<T, TopicError> {
    let (topic, payload) = frame
        .trim_start()
        .split_once(' ')
        .ok_or(TopicError::MissingTopic)?;

    if topic != T::TOPIC {
        return Err(TopicError::WrongTopic {
            expected: T::TOPIC,
            found: topic.to_string(),
        });
    }

    serde_json::from_str(payload).map_err(TopicError::DeserializationError)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive::{DriveParam, PidInput};
    use approx::assert_relative_eq;

    #[test]
    fn test_encode_prefixes_topic() {
        let frame = encode(&PidInput::new(0.5)).unwrap();

        assert!(frame.starts_with("wall_error "));
        assert_eq!(frame, "wall_error {\"pid_error\":0.5}");
    }

    #[test]
    fn test_decode_drive_param() {
        let msg: DriveParam =
            decode("drive_parameters {\"angle\":0.25,\"velocity\":3.5}").unwrap();

        assert_relative_eq!(msg.angle, 0.25);
        assert_relative_eq!(msg.velocity, 3.5);
    }

    #[test]
    fn test_decode_rejects_other_topic() {
        let res: Result<PidInput, _> = decode("drive_parameters {\"pid_error\":1.0}");

        match res {
            Err(TopicError::WrongTopic { expected, found }) => {
                assert_eq!(expected, "wall_error");
                assert_eq!(found, "drive_parameters");
            }
            other => panic!("Expected WrongTopic, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode::<PidInput>("wall_error"),
            Err(TopicError::MissingTopic)
        ));
        assert!(matches!(
            decode::<PidInput>("wall_error {\"angle\":1.0}"),
            Err(TopicError::DeserializationError(_))
        ));
    }
}
