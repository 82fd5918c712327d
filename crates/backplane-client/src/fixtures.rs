//! Canned server responses shared by unit tests

pub(crate) const TOKEN_JSON: &str = r#"{"token_type":"Bearer","access_token":"AA123456789","expires_in":604799,"scope":"bus:foo.com channel:channel_foo","refresh_token":"AR123456789"}"#;

pub(crate) const REFRESHED_TOKEN_JSON: &str = r#"{"token_type":"Bearer","access_token":"AA987654321","expires_in":604799,"scope":"bus:foo.com channel:channel_foo","refresh_token":"AR987654321"}"#;

pub(crate) const EXPIRED_TOKEN_BODY: &str =
    r#"{"error":"invalid_request","error_description":"expired token"}"#;

pub(crate) const INVALID_TOKEN_BODY: &str =
    r#"{"error":"invalid_request","error_description":"invalid token"}"#;

pub(crate) const NEXT_URL: &str =
    "https://backplane.com/v2/messages?since=2013-01-06T19:55:40.524Z-z2lbJUnkZt";

pub(crate) const MESSAGES_JSON: &str = r#"
{
    "nextURL":"https://backplane.com/v2/messages?since=2013-01-06T19:55:40.524Z-z2lbJUnkZt",
    "messages":[
        {
        "messageURL":"https://backplane.com/v2/message/2013-01-06T18:57:04.630Z-B5bguKLF2t",
        "source":"http://foo.com",
        "type":"test",
        "bus":"foo",
        "channel":"WHajRMv8N98ucjEJ6qffwrnL6Hzz2epJ",
        "sticky":"false",
        "expire":"2013-01-07T02:57:04Z",
        "payload":"bar"
        },
        {
        "messageURL":"https://backplane.com/v2/message/2013-01-06T19:07:31.385Z-zOnv6H6A10",
        "source":"http://foo.com",
        "type":"test",
        "bus":"foo",
        "channel":"pbY1P5F7IrLmcDLKkCiqlqmqPaO4PnjB",
        "sticky":"false",
        "expire":"2013-01-07T03:07:31Z",
        "payload":"bar"
        }
    ],
    "moreMessages":false
}"#;

pub(crate) const SINGLE_MESSAGE_JSON: &str =
    r#"{"channel":"channel","bus":"bus","payload":"bar","sticky":false,"type":"test"}"#;
