// Skill model
pub const TAG_TRANSITION: &str = "transition";
pub const TAG_SEND: &str = "send";
pub const TAG_PARAM: &str = "param";
pub const ATTR_NAME: &str = "name";
pub const ATTR_EVENT: &str = "event";
pub const ATTR_TARGET: &str = "target";
pub const ATTR_EXPR: &str = "expr";

// Interface definitions
pub const TAG_COMPONENT_DECLARATION: &str = "componentDeclaration";
pub const TAG_INTERFACE: &str = "interface";
pub const TAG_FUNCTION: &str = "function";
pub const TAG_DATA_FIELD: &str = "dataField";
pub const TAG_DATA_TYPE: &str = "dataType";
pub const ATTR_ID: &str = "id";
pub const ATTR_VIRTUAL: &str = "virtual";
pub const ATTR_INTERFACE: &str = "interface";

// Communication patterns
pub const TAG_ROS_SERVICE_SERVER: &str = "ros_service_server";
pub const TAG_ROS_SERVICE_CLIENT: &str = "ros_service_client";
pub const TAG_ROS_TOPIC_PUBLISHER: &str = "ros_topic_publisher";
pub const TAG_ROS_TOPIC_SUBSCRIBER: &str = "ros_topic_subscriber";
pub const TAG_ROS_ACTION_SERVER: &str = "ros_action_server";
pub const TAG_ROS_ACTION_CLIENT: &str = "ros_action_client";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_SERVICE_NAME: &str = "service_name";
pub const ATTR_TOPIC: &str = "topic";
pub const ATTR_ACTION_NAME: &str = "action_name";

// Field-bearing elements
pub const TAG_ROS_SERVICE_HANDLE_REQUEST: &str = "ros_service_handle_request";
pub const TAG_ROS_SERVICE_SEND_RESPONSE: &str = "ros_service_send_response";
pub const TAG_ROS_SERVICE_SEND_REQUEST: &str = "ros_service_send_request";
pub const TAG_ROS_SERVICE_HANDLE_RESPONSE: &str = "ros_service_handle_response";
pub const TAG_ROS_TOPIC_PUBLISH: &str = "ros_topic_publish";
pub const TAG_ROS_TOPIC_CALLBACK: &str = "ros_topic_callback";
pub const TAG_FIELD: &str = "field";
pub const TAG_ASSIGN: &str = "assign";
