//! core::resource::catalog
//!
//! The table of logging endpoint kinds.
//!
//! Shared field groups (formatting, file rotation, TLS, batching) are
//! declared once and referenced by every kind that supports them. Adding a
//! kind is a data change only.

use super::{FieldDescriptor, FieldKind, FlagRule, ResourceKind};

const fn text(field: &'static str, flag: &'static str, help: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        flag,
        kind: FieldKind::Text,
        required: false,
        help,
        wire: true,
    }
}

const fn uint(field: &'static str, flag: &'static str, help: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        flag,
        kind: FieldKind::Uint,
        required: false,
        help,
        wire: true,
    }
}

const fn int(field: &'static str, flag: &'static str, help: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        flag,
        kind: FieldKind::Int,
        required: false,
        help,
        wire: true,
    }
}

const fn boolean(field: &'static str, flag: &'static str, help: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        flag,
        kind: FieldKind::Bool,
        required: false,
        help,
        wire: true,
    }
}

const fn required(d: FieldDescriptor) -> FieldDescriptor {
    FieldDescriptor {
        required: true,
        ..d
    }
}

const fn cli_only(d: FieldDescriptor) -> FieldDescriptor {
    FieldDescriptor { wire: false, ..d }
}

// =============================================================================
// Shared field groups
// =============================================================================

const FORMATTING: &[FieldDescriptor] = &[
    text("format", "format", "Apache style log formatting"),
    uint(
        "format_version",
        "format-version",
        "The version of the custom logging format. Can be either 2 (default) or 1",
    ),
    text(
        "placement",
        "placement",
        "Where in the generated VCL the logging call should be placed. Can be none or waf_debug",
    ),
    text(
        "response_condition",
        "response-condition",
        "The name of an existing condition, or leave blank to always execute",
    ),
];

const MESSAGE_TYPE: &[FieldDescriptor] = &[text(
    "message_type",
    "message-type",
    "How the message should be formatted. One of: classic (default), loggly, logplex or blank",
)];

const FILE_ROTATION: &[FieldDescriptor] = &[
    text("path", "path", "The path to upload logs to"),
    uint(
        "period",
        "period",
        "How frequently log files are finalized, in seconds (default 3600)",
    ),
    uint(
        "gzip_level",
        "gzip-level",
        "What level of gzip encoding to have when dumping logs (default 0, no compression)",
    ),
    text(
        "compression_codec",
        "compression-codec",
        "The codec used for compression of your logs. One of: zstd, snappy, gzip",
    ),
    text(
        "timestamp_format",
        "timestamp-format",
        "strftime specified timestamp formatting (default \"%Y-%m-%dT%H:%M:%S.000\")",
    ),
    text(
        "public_key",
        "public-key",
        "A PGP public key used to encrypt log files before they are written",
    ),
    text(
        "message_type",
        "message-type",
        "How the message should be formatted. One of: classic (default), loggly, logplex or blank",
    ),
];

const TLS: &[FieldDescriptor] = &[
    text(
        "tls_ca_cert",
        "tls-ca-cert",
        "A secure certificate to authenticate the server with, in PEM format",
    ),
    text(
        "tls_client_cert",
        "tls-client-cert",
        "The client certificate used to make authenticated requests, in PEM format",
    ),
    text(
        "tls_client_key",
        "tls-client-key",
        "The client private key used to make authenticated requests, in PEM format",
    ),
    text(
        "tls_hostname",
        "tls-hostname",
        "The hostname used to verify the server's certificate",
    ),
];

const BATCHING: &[FieldDescriptor] = &[
    uint(
        "request_max_entries",
        "request-max-entries",
        "Maximum number of logs to append to a batch, if non-zero",
    ),
    uint(
        "request_max_bytes",
        "request-max-bytes",
        "Maximum size of a log batch, if non-zero",
    ),
];

const CODEC_VS_GZIP: (&str, &str) = ("compression-codec", "gzip-level");

const FILE_EXCLUSIVE: &[(&str, &str)] = &[CODEC_VS_GZIP];

const AWS_EXCLUSIVE: &[(&str, &str)] = &[("access-key", "iam-role"), ("secret-key", "iam-role")];

const AWS_CREDENTIALS: &[FlagRule] = &[FlagRule::OneOfGroups(&[
    &["access-key", "secret-key"],
    &["iam-role"],
])];

const KAFKA_SASL: &[FlagRule] = &[FlagRule::Gated {
    gate: "use-sasl",
    dependents: &["auth-method", "username", "password"],
}];

// =============================================================================
// Kinds
// =============================================================================

pub static AZUREBLOB: ResourceKind = ResourceKind {
    id: "azureblob",
    display: "Azure Blob Storage",
    path: "azureblob",
    groups: &[
        &[
            required(text("container", "container", "The Azure Blob Storage container to store logs in")),
            required(text("account_name", "account-name", "The Azure Blob Storage account namespace")),
            required(text("sas_token", "sas-token", "The Azure shared access signature with write access")),
            uint("file_max_bytes", "file-max-bytes", "The maximum size of a log file in bytes"),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: FILE_EXCLUSIVE,
    rules: &[],
};

pub static BIGQUERY: ResourceKind = ResourceKind {
    id: "bigquery",
    display: "BigQuery",
    path: "bigquery",
    groups: &[
        &[
            required(text("project_id", "project-id", "Your Google Cloud Platform project ID")),
            required(text("dataset", "dataset", "Your BigQuery dataset")),
            required(text("table", "table", "Your BigQuery table")),
            required(text("user", "user", "Your service account email address")),
            required(text("secret_key", "secret-key", "Your service account private key")),
            text("template_suffix", "template-suffix", "BigQuery table name suffix template"),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static CLOUDFILES: ResourceKind = ResourceKind {
    id: "cloudfiles",
    display: "Cloudfiles",
    path: "cloudfiles",
    groups: &[
        &[
            required(text("user", "user", "The username for your Cloudfiles account")),
            required(text("access_key", "access-key", "Your Cloudfiles account access key")),
            required(text("bucket_name", "bucket", "The name of your Cloudfiles container")),
            text("region", "region", "The region to stream logs to"),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: FILE_EXCLUSIVE,
    rules: &[],
};

pub static DATADOG: ResourceKind = ResourceKind {
    id: "datadog",
    display: "Datadog",
    path: "datadog",
    groups: &[
        &[
            required(text("token", "auth-token", "The API key from your Datadog account")),
            text("region", "region", "The region that log data will be sent to. One of US or EU"),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static DIGITALOCEAN: ResourceKind = ResourceKind {
    id: "digitalocean",
    display: "DigitalOcean Spaces",
    path: "digitalocean",
    groups: &[
        &[
            required(text("bucket_name", "bucket", "The name of the DigitalOcean Space")),
            required(text("access_key", "access-key", "Your DigitalOcean Spaces account access key")),
            required(text("secret_key", "secret-key", "Your DigitalOcean Spaces account secret key")),
            text("domain", "domain", "The domain of the DigitalOcean Spaces endpoint"),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: FILE_EXCLUSIVE,
    rules: &[],
};

pub static ELASTICSEARCH: ResourceKind = ResourceKind {
    id: "elasticsearch",
    display: "Elasticsearch",
    path: "elasticsearch",
    groups: &[
        &[
            required(text("url", "url", "The URL to stream logs to. Must use HTTPS")),
            required(text("index", "index", "The name of the Elasticsearch index to send documents to")),
            text("pipeline", "pipeline", "The ID of the Elasticsearch ingest pipeline to apply"),
            text("user", "user", "Basic Auth username"),
            text("password", "password", "Basic Auth password"),
        ],
        TLS,
        BATCHING,
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static FTP: ResourceKind = ResourceKind {
    id: "ftp",
    display: "FTP",
    path: "ftp",
    groups: &[
        &[
            required(text("address", "address", "An hostname or IPv4 address")),
            required(text("user", "user", "The username for the server (can be anonymous)")),
            required(text("password", "password", "The password for the server")),
            uint("port", "port", "The port number"),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: FILE_EXCLUSIVE,
    rules: &[],
};

pub static GCS: ResourceKind = ResourceKind {
    id: "gcs",
    display: "GCS",
    path: "gcs",
    groups: &[
        &[
            required(text("bucket_name", "bucket", "The bucket of the GCS bucket")),
            text("user", "user", "Your GCS service account email address"),
            text("secret_key", "secret-key", "Your GCS account secret key"),
            text("account_name", "account-name", "The name of the Google Cloud service account to impersonate"),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: FILE_EXCLUSIVE,
    rules: &[],
};

pub static GOOGLEPUBSUB: ResourceKind = ResourceKind {
    id: "googlepubsub",
    display: "Google Cloud Pub/Sub",
    path: "pubsub",
    groups: &[
        &[
            required(text("user", "user", "Your service account email address")),
            required(text("secret_key", "secret-key", "Your service account private key")),
            required(text("topic", "topic", "The Pub/Sub topic to which logs will be published")),
            required(text("project_id", "project-id", "The ID of your Google Cloud Platform project")),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static HEROKU: ResourceKind = ResourceKind {
    id: "heroku",
    display: "Heroku",
    path: "heroku",
    groups: &[
        &[
            required(text("url", "url", "The url to stream logs to")),
            required(text("token", "auth-token", "The token to use for authentication")),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static HONEYCOMB: ResourceKind = ResourceKind {
    id: "honeycomb",
    display: "Honeycomb",
    path: "honeycomb",
    groups: &[
        &[
            required(text("dataset", "dataset", "The Honeycomb dataset you want to log to")),
            required(text("token", "auth-token", "The Write Key from the Account page of your Honeycomb account")),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static HTTPS: ResourceKind = ResourceKind {
    id: "https",
    display: "HTTPS",
    path: "https",
    groups: &[
        &[
            required(text("url", "url", "URL that log data will be sent to. Must use the https protocol")),
            text("content_type", "content-type", "Content type of the header sent with the request"),
            text("header_name", "header-name", "Name of the custom header sent with the request"),
            text("header_value", "header-value", "Value of the custom header sent with the request"),
            text("method", "method", "HTTP method used for request. Can be POST or PUT"),
            text("json_format", "json-format", "Enforces valid JSON formatting for log entries. One of 0, 1 or 2"),
        ],
        TLS,
        BATCHING,
        MESSAGE_TYPE,
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static KAFKA: ResourceKind = ResourceKind {
    id: "kafka",
    display: "Kafka",
    path: "kafka",
    groups: &[
        &[
            required(text("topic", "topic", "The Kafka topic to send logs to")),
            required(text("brokers", "brokers", "A comma-separated list of Kafka broker addresses")),
            text("compression_codec", "compression-codec", "The codec used for compression of your logs. One of: gzip, snappy, lz4"),
            int("required_acks", "required-acks", "Acknowledgements a leader must receive before a write succeeds. One of 1, 0 or -1"),
            boolean("use_tls", "use-tls", "Whether to use TLS for secure logging"),
            boolean("parse_log_keyvals", "parse-log-keyvals", "Parse key-value pairs within the log format"),
            uint("request_max_bytes", "max-batch-size", "The maximum size of the log batch in bytes"),
            cli_only(boolean("use_sasl", "use-sasl", "Enable SASL authentication. Requires --auth-method, --username and --password")),
            text("auth_method", "auth-method", "SASL authentication method. One of: plain, scram-sha-256, scram-sha-512. Requires --use-sasl"),
            text("user", "username", "SASL authentication username. Requires --use-sasl"),
            text("password", "password", "SASL authentication password. Requires --use-sasl"),
        ],
        TLS,
        FORMATTING,
    ],
    exclusive: &[],
    rules: KAFKA_SASL,
};

pub static KINESIS: ResourceKind = ResourceKind {
    id: "kinesis",
    display: "Kinesis",
    path: "kinesis",
    groups: &[
        &[
            required(text("topic", "stream-name", "The Amazon Kinesis stream to send logs to")),
            required(text("region", "region", "The AWS region where the Kinesis stream exists")),
            text("access_key", "access-key", "The access key associated with the target stream"),
            text("secret_key", "secret-key", "The secret key associated with the target stream"),
            text("iam_role", "iam-role", "The IAM role ARN for logging"),
        ],
        FORMATTING,
    ],
    exclusive: AWS_EXCLUSIVE,
    rules: AWS_CREDENTIALS,
};

pub static LOGENTRIES: ResourceKind = ResourceKind {
    id: "logentries",
    display: "Logentries",
    path: "logentries",
    groups: &[
        &[
            uint("port", "port", "The port number"),
            boolean("use_tls", "use-tls", "Whether to use TLS for secure logging"),
            text("token", "auth-token", "Use token based authentication"),
            text("region", "region", "The region to which to stream logs"),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static LOGGLY: ResourceKind = ResourceKind {
    id: "loggly",
    display: "Loggly",
    path: "loggly",
    groups: &[
        &[required(text("token", "auth-token", "The token to use for authentication"))],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static LOGSHUTTLE: ResourceKind = ResourceKind {
    id: "logshuttle",
    display: "Logshuttle",
    path: "logshuttle",
    groups: &[
        &[
            required(text("url", "url", "Your Log Shuttle endpoint url")),
            required(text("token", "auth-token", "The data authentication token associated with this endpoint")),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static OPENSTACK: ResourceKind = ResourceKind {
    id: "openstack",
    display: "OpenStack",
    path: "openstack",
    groups: &[
        &[
            required(text("bucket_name", "bucket", "The name of your OpenStack container")),
            required(text("access_key", "access-key", "Your OpenStack account access key")),
            required(text("user", "user", "The username for your OpenStack account")),
            required(text("url", "url", "Your OpenStack auth url")),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: FILE_EXCLUSIVE,
    rules: &[],
};

pub static PAPERTRAIL: ResourceKind = ResourceKind {
    id: "papertrail",
    display: "Papertrail",
    path: "papertrail",
    groups: &[
        &[
            required(text("address", "address", "A hostname or IPv4 address")),
            uint("port", "port", "The port number"),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static S3: ResourceKind = ResourceKind {
    id: "s3",
    display: "S3",
    path: "s3",
    groups: &[
        &[
            required(text("bucket_name", "bucket", "Your S3 bucket name")),
            text("access_key", "access-key", "Your S3 account access key"),
            text("secret_key", "secret-key", "Your S3 account secret key"),
            text("iam_role", "iam-role", "The IAM role ARN for logging"),
            text("domain", "domain", "The domain of the S3 endpoint"),
            text("redundancy", "redundancy", "The S3 redundancy level. Can be either standard or reduced_redundancy"),
            text("server_side_encryption", "server-side-encryption", "Set to enable S3 Server Side Encryption. Can be either AES256 or aws:kms"),
            text("server_side_encryption_kms_key_id", "server-side-encryption-kms-key-id", "Server-side KMS Key ID. Must be set if server-side-encryption is aws:kms"),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: &[
        CODEC_VS_GZIP,
        ("access-key", "iam-role"),
        ("secret-key", "iam-role"),
    ],
    rules: AWS_CREDENTIALS,
};

pub static SCALYR: ResourceKind = ResourceKind {
    id: "scalyr",
    display: "Scalyr",
    path: "scalyr",
    groups: &[
        &[
            required(text("token", "auth-token", "The token to use for authentication")),
            text("region", "region", "The region that log data will be sent to. One of US or EU"),
            text("project_id", "project-id", "The name of the logfile field sent to Scalyr"),
        ],
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static SFTP: ResourceKind = ResourceKind {
    id: "sftp",
    display: "SFTP",
    path: "sftp",
    groups: &[
        &[
            required(text("address", "address", "The hostname or IPv4 address")),
            required(text("user", "user", "The username for the server")),
            required(text("ssh_known_hosts", "ssh-known-hosts", "A list of host keys for all hosts we can connect to over SFTP")),
            uint("port", "port", "The port number"),
            text("password", "password", "The password for the server"),
            text("secret_key", "secret-key", "The SSH private key for the server"),
        ],
        FILE_ROTATION,
        FORMATTING,
    ],
    exclusive: FILE_EXCLUSIVE,
    rules: &[],
};

pub static SPLUNK: ResourceKind = ResourceKind {
    id: "splunk",
    display: "Splunk",
    path: "splunk",
    groups: &[
        &[
            required(text("url", "url", "The URL to POST to")),
            text("token", "auth-token", "A Splunk token for use in posting logs over HTTP to your collector"),
        ],
        TLS,
        BATCHING,
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static SUMOLOGIC: ResourceKind = ResourceKind {
    id: "sumologic",
    display: "Sumologic",
    path: "sumologic",
    groups: &[
        &[required(text("url", "url", "The URL to POST to"))],
        MESSAGE_TYPE,
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

pub static SYSLOG: ResourceKind = ResourceKind {
    id: "syslog",
    display: "Syslog",
    path: "syslog",
    groups: &[
        &[
            required(text("address", "address", "A hostname or IPv4 address")),
            uint("port", "port", "The port number"),
            boolean("use_tls", "use-tls", "Whether to use TLS for secure logging"),
            text("token", "auth-token", "Whether to prepend each message with a specific token"),
        ],
        TLS,
        MESSAGE_TYPE,
        FORMATTING,
    ],
    exclusive: &[],
    rules: &[],
};

/// Every catalogued kind, in CLI help order.
pub static ALL: &[&ResourceKind] = &[
    &AZUREBLOB,
    &BIGQUERY,
    &CLOUDFILES,
    &DATADOG,
    &DIGITALOCEAN,
    &ELASTICSEARCH,
    &FTP,
    &GCS,
    &GOOGLEPUBSUB,
    &HEROKU,
    &HONEYCOMB,
    &HTTPS,
    &KAFKA,
    &KINESIS,
    &LOGENTRIES,
    &LOGGLY,
    &LOGSHUTTLE,
    &OPENSTACK,
    &PAPERTRAIL,
    &S3,
    &SCALYR,
    &SFTP,
    &SPLUNK,
    &SUMOLOGIC,
    &SYSLOG,
];

/// Look up a kind by its CLI name.
pub fn find(id: &str) -> Option<&'static ResourceKind> {
    ALL.iter().copied().find(|k| k.id == id)
}
