//! cli::logging_args
//!
//! The `logging <kind> <verb>` command tree, built from the resource catalog.
//!
//! Each kind gets one subcommand with the five verbs beneath it. `create`
//! and `update` take one flag per field descriptor. Field values are kept as
//! raw text together with whether the user supplied them, and only converted
//! by [`ResourceKind::bind`] once the request is assembled.

use std::collections::BTreeMap;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

use super::args::parse_version;
use crate::core::optional::OptionalValue;
use crate::core::resource::{catalog, FieldDescriptor, FieldKind, ResourceError, ResourceKind, Verb};
use crate::core::types::VersionSpecifier;
use crate::engine::EndpointRequest;

/// Parsed `logging` arguments.
#[derive(Debug, Clone)]
pub struct LoggingArgs {
    pub kind: &'static ResourceKind,
    pub verb: Verb,
    pub version: VersionSpecifier,
    pub autoclone: bool,
    pub name: Option<String>,
    pub new_name: OptionalValue<String>,
    /// Raw field values keyed by field name.
    pub fields: BTreeMap<&'static str, OptionalValue<String>>,
}

impl LoggingArgs {
    /// Convert field text into typed values and build the engine request.
    pub fn into_request(self) -> Result<EndpointRequest, ResourceError> {
        let overrides = self.kind.bind(&self.fields)?;
        Ok(EndpointRequest {
            kind: self.kind,
            verb: self.verb,
            version: self.version,
            autoclone: self.autoclone,
            name: self.name,
            new_name: self.new_name,
            overrides,
        })
    }
}

fn field_id(descriptor: &FieldDescriptor) -> String {
    format!("field.{}", descriptor.field)
}

fn takes_fields(verb: Verb) -> bool {
    matches!(verb, Verb::Create | Verb::Update)
}

fn field_arg(descriptor: &'static FieldDescriptor, verb: Verb) -> Arg {
    let help = if verb == Verb::Create && descriptor.required {
        format!("{} (required)", descriptor.help)
    } else {
        descriptor.help.to_string()
    };
    let arg = Arg::new(field_id(descriptor))
        .long(descriptor.flag)
        .value_name(descriptor.kind.value_name())
        .help(help)
        .action(ArgAction::Set);
    match descriptor.kind {
        FieldKind::Bool => arg.num_args(0..=1).default_missing_value("true"),
        _ => arg,
    }
}

fn verb_command(kind: &'static ResourceKind, verb: Verb) -> Command {
    let about = match verb {
        Verb::Create => format!("Create a {} logging endpoint", kind.display),
        Verb::Describe => format!("Show a {} logging endpoint", kind.display),
        Verb::List => format!("List {} logging endpoints", kind.display),
        Verb::Update => format!("Update a {} logging endpoint", kind.display),
        Verb::Delete => format!("Delete a {} logging endpoint", kind.display),
    };

    let mut cmd = Command::new(verb.as_str()).about(about).arg(
        Arg::new("version")
            .long("version")
            .value_name("VERSION")
            .help("Service version: a number, 'latest' or 'active'")
            .required(true)
            .value_parser(parse_version),
    );

    if verb.is_mutating() {
        cmd = cmd.arg(
            Arg::new("autoclone")
                .long("autoclone")
                .help("If the version is active or locked, clone it and change the clone")
                .action(ArgAction::SetTrue),
        );
    }
    if verb != Verb::List {
        cmd = cmd.arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .help("Name of the logging endpoint")
                .required(true),
        );
    }
    if verb == Verb::Update {
        cmd = cmd.arg(
            Arg::new("new-name")
                .long("new-name")
                .value_name("NAME")
                .help("Rename the logging endpoint"),
        );
    }
    if takes_fields(verb) {
        cmd = cmd.args(kind.fields().map(|d| field_arg(d, verb)));
    }
    cmd
}

fn kind_command(kind: &'static ResourceKind) -> Command {
    Command::new(kind.id)
        .about(format!("Manage {} logging endpoints", kind.display))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(Verb::ALL.into_iter().map(|verb| verb_command(kind, verb)))
}

fn was_set(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

fn optional_string(matches: &ArgMatches, id: &str) -> OptionalValue<String> {
    OptionalValue::from_parts(
        was_set(matches, id),
        matches.get_one::<String>(id).cloned().unwrap_or_default(),
    )
}

fn missing(what: &str) -> clap::Error {
    clap::Error::raw(ErrorKind::MissingSubcommand, format!("missing {}\n", what))
}

impl FromArgMatches for LoggingArgs {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let (kind_name, kind_matches) = matches
            .subcommand()
            .ok_or_else(|| missing("logging endpoint kind"))?;
        let kind = catalog::find(kind_name).ok_or_else(|| {
            clap::Error::raw(
                ErrorKind::InvalidSubcommand,
                format!("unknown logging endpoint kind '{}'\n", kind_name),
            )
        })?;
        let (verb_name, m) = kind_matches
            .subcommand()
            .ok_or_else(|| missing("logging endpoint command"))?;
        let verb = Verb::from_name(verb_name).ok_or_else(|| {
            clap::Error::raw(
                ErrorKind::InvalidSubcommand,
                format!("unknown command '{}'\n", verb_name),
            )
        })?;

        let version = m
            .get_one::<VersionSpecifier>("version")
            .copied()
            .ok_or_else(|| clap::Error::raw(ErrorKind::MissingRequiredArgument, "missing --version\n"))?;

        let fields = if takes_fields(verb) {
            kind.fields()
                .map(|d| (d.field, optional_string(m, &field_id(d))))
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            kind,
            verb,
            version,
            autoclone: verb.is_mutating() && m.get_flag("autoclone"),
            name: if verb == Verb::List {
                None
            } else {
                m.get_one::<String>("name").cloned()
            },
            new_name: if verb == Verb::Update {
                optional_string(m, "new-name")
            } else {
                OptionalValue::unset()
            },
            fields,
        })
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}

impl Args for LoggingArgs {
    fn augment_args(cmd: Command) -> Command {
        cmd.subcommand_required(true)
            .arg_required_else_help(true)
            .subcommands(catalog::ALL.iter().copied().map(kind_command))
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}
