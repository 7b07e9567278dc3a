//! Sample log schema used across the integration tests
//!
//! ```text
//! message Root {
//!   repeated Item items = 1;
//!   repeated CommonInfoAttr attrs = 2;
//!   map<int64, SimpleAdDspInfos> history = 3;
//!   map<uint64, LabelAttr> labels = 4;
//!   UserInfo user_info = 5;
//!   Context context = 6;
//!   PhotoInfo_t photo = 7;
//! }
//! ```

use logschema::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor, ScalarType};

pub const ROOT_NAME: &str = "root";

/// Attribute names the schema enumerates: (name, number)
pub const ATTR_MEMBERS: &[(&str, i64)] = &[
    ("UNKNOW_NAME", 0),
    ("FOO", 1),
    ("APP_LIST", 2),
    ("LPS_LLM_LANDING_USER_LPS_1cate_30D", 3),
    ("EXT_A", 11000),
];

/// Plain leaf paths whose canonical rendering equals the path itself
pub const PLAIN_LEAVES: &[&str] = &[
    "root.items.id",
    "root.items.title",
    "root.user_info.id",
    "root.user_info.follow_ids",
    "root.user_info.counters",
    "root.user_info.serialized_reco_user_info",
    "root.user_info.device_info.device_id",
    "root.context.page",
    "root.photo.photo_id",
];

pub fn item() -> MessageDescriptor {
    MessageDescriptor::new("Item")
        .with_field(FieldDescriptor::scalar("id", 1, ScalarType::Int64))
        .with_field(FieldDescriptor::scalar("title", 2, ScalarType::String))
}

pub fn common_info_attr() -> MessageDescriptor {
    MessageDescriptor::new("CommonInfoAttr")
        .with_enum(
            EnumDescriptor::new("Name")
                .with_value("UNKNOW_NAME", 0)
                .with_value("FOO", 1)
                .with_commented_value("APP_LIST", 2, "installed app list")
                .with_value("LPS_LLM_LANDING_USER_LPS_1cate_30D", 3),
        )
        .with_enum(EnumDescriptor::new("NameExtendOne").with_value("EXT_A", 11000))
        .with_enum(
            EnumDescriptor::new("AttrType")
                .with_value("UNKNOW_ATTR", 0)
                .with_value("INT_ATTR", 1),
        )
        .with_field(FieldDescriptor::scalar("type", 1, ScalarType::Int32))
        .with_field(FieldDescriptor::scalar("name_value", 2, ScalarType::Int32))
        .with_field(FieldDescriptor::scalar("int_value", 3, ScalarType::Int64))
        .with_field(FieldDescriptor::scalar("float_value", 4, ScalarType::Float))
        .with_field(FieldDescriptor::scalar("string_value", 5, ScalarType::String))
        .with_field(FieldDescriptor::repeated_scalar("int_list_value", 6, ScalarType::Int64))
}

pub fn label_attr() -> MessageDescriptor {
    MessageDescriptor::new("LabelAttr")
        .with_enum(EnumDescriptor::new("Name").with_value("UNKNOW_NAME", 0))
        .with_field(FieldDescriptor::scalar("name_value", 1, ScalarType::Int64))
        .with_field(FieldDescriptor::scalar("int_value", 2, ScalarType::Int64))
        .with_field(FieldDescriptor::scalar("bool_value", 3, ScalarType::Bool))
}

pub fn simple_ad_dsp_infos() -> MessageDescriptor {
    let record = MessageDescriptor::new("SimpleAdDspInfo")
        .with_field(FieldDescriptor::scalar("photo_id", 1, ScalarType::Uint64))
        .with_field(FieldDescriptor::scalar("action_timestamp", 2, ScalarType::Int64));

    MessageDescriptor::new("SimpleAdDspInfos")
        .with_field(FieldDescriptor::scalar("amount", 1, ScalarType::Int64))
        .with_field(FieldDescriptor::repeated_message("list", 2, record.shared()))
}

pub fn user_info() -> MessageDescriptor {
    let device = MessageDescriptor::new("DeviceInfo")
        .with_field(FieldDescriptor::scalar("device_id", 1, ScalarType::String));

    MessageDescriptor::new("UserInfo")
        .with_field(FieldDescriptor::scalar("id", 1, ScalarType::Uint64).with_comment("user id"))
        .with_field(FieldDescriptor::enumeration(
            "os_type",
            2,
            EnumDescriptor::new("OsType")
                .with_value("UNKNOWN_OS_TYPE", 0)
                .with_commented_value("ANDROID", 1, "android device"),
        ))
        .with_field(FieldDescriptor::repeated_scalar("follow_ids", 3, ScalarType::Uint64))
        .with_field(FieldDescriptor::map(
            "counters",
            4,
            ScalarType::String,
            FieldType::Scalar {
                scalar: ScalarType::Int64,
            },
        ))
        .with_field(FieldDescriptor::group("legacy", 5))
        .with_field(FieldDescriptor::scalar(
            "serialized_reco_user_info",
            6,
            ScalarType::Bytes,
        ))
        .with_field(FieldDescriptor::repeated_message("device_info", 7, device.shared()))
        .with_field(FieldDescriptor::repeated_message(
            "common_info_attr",
            8,
            common_info_attr().shared(),
        ))
}

pub fn context() -> MessageDescriptor {
    MessageDescriptor::new("Context")
        .with_field(FieldDescriptor::scalar("page", 1, ScalarType::Int64))
        .with_field(FieldDescriptor::repeated_message(
            "info_attr",
            2,
            common_info_attr().shared(),
        ))
}

pub fn root_descriptor() -> MessageDescriptor {
    let photo = MessageDescriptor::new("PhotoInfo_t")
        .with_field(FieldDescriptor::scalar("photo_id", 1, ScalarType::Uint64));

    MessageDescriptor::new("Root")
        .with_field(FieldDescriptor::repeated_message("items", 1, item().shared()))
        .with_field(FieldDescriptor::repeated_message("attrs", 2, common_info_attr().shared()))
        .with_field(FieldDescriptor::map(
            "history",
            3,
            ScalarType::Int64,
            FieldType::Message {
                message: simple_ad_dsp_infos().shared(),
            },
        ))
        .with_field(FieldDescriptor::map(
            "labels",
            4,
            ScalarType::Uint64,
            FieldType::Message {
                message: label_attr().shared(),
            },
        ))
        .with_field(FieldDescriptor::message("user_info", 5, user_info().shared()))
        .with_field(FieldDescriptor::message("context", 6, context().shared()))
        .with_field(FieldDescriptor::message("photo", 7, photo.shared()))
}
