// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to show (defaults to the current month)")
}

fn record_fields(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("kind")
            .long("kind")
            .value_parser(["amount", "deposit", "withdrawal"])
            .help("Record type"),
    )
    .arg(
        Arg::new("total")
            .long("total")
            .value_name("AMOUNT")
            .help("Account balance after this entry"),
    )
    .arg(
        Arg::new("value")
            .long("value")
            .value_name("AMOUNT")
            .help("Deposit or withdrawal size"),
    )
}

pub fn build_cli() -> Command {
    Command::new("capital")
        .version(crate_version!())
        .about("Track an investment account and its real yield, net of deposits and withdrawals")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("CAPITAL_DB")
                .value_name("PATH")
                .help("SQLite database path"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v debug, -vv trace)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("record")
                .about("Balance snapshots, deposits and withdrawals")
                .subcommand(
                    record_fields(
                        Command::new("add")
                            .about("Add a record")
                            .arg(Arg::new("date").long("date").required(true)),
                    )
                    .arg(
                        Arg::new("timestamp")
                            .long("timestamp")
                            .value_parser(value_parser!(i64))
                            .help("Creation time in ms (defaults to now)"),
                    ),
                )
                .subcommand(record_fields(
                    Command::new("edit")
                        .about("Update the record keyed by date and timestamp")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("timestamp")
                                .long("timestamp")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a record")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("timestamp")
                                .long("timestamp")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List a month's records with their daily yield")
                        .arg(month_arg()),
                )),
        )
        .subcommand(
            Command::new("baseline")
                .about("Balance held before the first record")
                .subcommand(
                    Command::new("set")
                        .about("Set the initial amount")
                        .arg(
                            Arg::new("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                )
                .subcommand(Command::new("show").about("Show the initial amount"))
                .subcommand(Command::new("clear").about("Remove the initial amount")),
        )
        .subcommand(
            Command::new("report")
                .about("Yield reports")
                .subcommand(json_args(
                    Command::new("yield")
                        .about("Current amount and the month's real yield")
                        .arg(month_arg()),
                ))
                .subcommand(json_args(
                    Command::new("stats")
                        .about("Best gain, worst loss and working-day average")
                        .arg(month_arg())
                        .arg(
                            Arg::new("as-of")
                                .long("as-of")
                                .value_name("YYYY-MM-DD")
                                .help("Count working days up to this date (defaults to today)"),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("months")
                        .about("Real yield per month, newest first")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize))
                                .help("How many months to show (default 12)"),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("document")
                        .about("Write the user document")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("json")
                                .help("json|csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("document")
                        .about("Load a user document (JSON)")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(
                            Arg::new("replace")
                                .long("replace")
                                .action(ArgAction::SetTrue)
                                .help("Drop existing records first"),
                        ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show").about("Show settings"))
                .subcommand(
                    Command::new("set-currency")
                        .about("Currency label used in reports")
                        .arg(Arg::new("currency").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the records for problems"))
}
