//! Field catalogues of the settings pages.

use super::{Binding, CalibrationTerm, Choice, FieldKind, FieldSpec};
use crate::station::{StationRow, StationType};
use crate::verbosity::Verbosity;

fn text(name: &str, label: &str, key: &str) -> FieldSpec {
    FieldSpec::new(name, label, FieldKind::Text, Binding::Key(key.to_string()))
}

fn password(name: &str, label: &str, key: &str) -> FieldSpec {
    FieldSpec::new(
        name,
        label,
        FieldKind::Password,
        Binding::Key(key.to_string()),
    )
}

fn checkbox(name: &str, label: &str, key: &str) -> FieldSpec {
    FieldSpec::new(
        name,
        label,
        FieldKind::Checkbox,
        Binding::Key(key.to_string()),
    )
}

fn select(name: &str, label: &str, key: &str, values: &[&str]) -> FieldSpec {
    let choices = values.iter().map(|value| Choice::new(*value, *value)).collect();
    FieldSpec::new(
        name,
        label,
        FieldKind::Select(choices),
        Binding::Key(key.to_string()),
    )
}

fn verbose(daemon: &str, bit: Verbosity) -> FieldSpec {
    FieldSpec::new(
        format!("field_{daemon}_Verbose"),
        format!("{daemon}:"),
        FieldKind::Checkbox,
        Binding::VerbosityBit(bit),
    )
    .in_section("Verbose Logging")
}

fn with_section(section: &str, fields: Vec<FieldSpec>) -> Vec<FieldSpec> {
    fields
        .into_iter()
        .map(|field| field.in_section(section))
        .collect()
}

pub(super) fn station() -> Vec<FieldSpec> {
    let stations = StationType::ALL
        .into_iter()
        .map(|station| Choice::new(station.label(), station.label()))
        .collect();
    let interfaces = vec![
        Choice::new("serial", "Serial"),
        Choice::new("ethernet", "Ethernet"),
    ];

    let mut fields = with_section(
        "Communication",
        vec![
            FieldSpec::new(
                "field_Station_Type",
                "Station Type:",
                FieldKind::Select(stations),
                Binding::StationType,
            ),
            FieldSpec::new(
                "field_Station_Interface",
                "Station Interface:",
                FieldKind::Radio(interfaces),
                Binding::Key("STATION_INTERFACE".to_string()),
            )
            .on_row(StationRow::Interface),
            text("field_Station_Device", "Serial Device:", "STATION_DEV")
                .with_help("/dev/ttyS0, /dev/ttyUSB0, etc.")
                .on_row(StationRow::Device),
            text("field_Station_Host", "Hostname or IP Address:", "STATION_HOST")
                .on_row(StationRow::Host),
            text("field_Station_Port", "Port Number:", "STATION_PORT").on_row(StationRow::Port),
            checkbox(
                "field_Station_WLIP",
                "Is This a WeatherLinkIP Station?",
                "STATION_WLIP",
            )
            .with_help(
                "Only select this if you have a Vantage Pro station with the WeatherLinkIP \
                 datalogger. The default port number for the datalogger is 22222.",
            )
            .on_row(StationRow::WeatherLinkIp),
            checkbox(
                "field_Station_Retrieve_Archive",
                "Retrieve Archive Records From the Console?",
                "STATION_RETRIEVE_ARCHIVE",
            )
            .on_row(StationRow::RetrieveArchive),
            checkbox(
                "field_Station_Do_DTR",
                "Toggle the Serial DTR Line?",
                "STATION_DTR",
            )
            .on_row(StationRow::SerialDtr),
        ],
    );

    fields.extend(with_section(
        "Rain",
        vec![
            text(
                "field_Station_Rain_Season_Start",
                "Rain Season Start Month:",
                "STATION_RAIN_SEASON_START",
            )
            .with_help("1 - 12"),
            text(
                "field_Station_Storm_Trigger_Start",
                "Storm Start Trigger (in/hr):",
                "STATION_RAIN_STORM_TRIGGER_START",
            ),
            text(
                "field_Station_Storm_Trigger_Stop",
                "Storm Idle Stop (hours):",
                "STATION_RAIN_STORM_IDLE_STOP",
            ),
            text(
                "field_Station_Rain_YTD",
                "Year-to-Date Rain (inches):",
                "STATION_RAIN_YTD",
            ),
            text(
                "field_Station_ET_YTD",
                "Year-to-Date ET (inches):",
                "STATION_ET_YTD",
            ),
            text(
                "field_Station_YTD_Year",
                "Year for the YTD Values:",
                "STATION_RAIN_ET_YTD_YEAR",
            ),
        ],
    ));

    fields.extend(
        with_section(
            "Location",
            vec![
                text(
                    "field_Station_Elevation",
                    "Elevation (feet):",
                    "STATION_ELEVATION",
                ),
                text(
                    "field_Station_Latitude",
                    "Latitude (decimal degrees):",
                    "STATION_LATITUDE",
                )
                .with_help("Negative for southern hemisphere"),
                text(
                    "field_Station_Longitude",
                    "Longitude (decimal degrees):",
                    "STATION_LONGITUDE",
                )
                .with_help("Negative for western hemisphere"),
            ],
        )
        .into_iter()
        .map(|field| field.on_row(StationRow::Location)),
    );

    fields.extend(with_section(
        "Intervals",
        vec![
            text(
                "field_Station_Archive_Interval",
                "Archive Interval (minutes):",
                "STATION_ARCHIVE_INTERVAL",
            )
            .with_help("1, 5, 10, 15 or 30"),
            text(
                "field_Station_Polling_Interval",
                "Polling Interval (seconds):",
                "STATION_POLL_INTERVAL",
            ),
            text(
                "field_Station_Push_Interval",
                "Push Interval (seconds):",
                "STATION_PUSH_INTERVAL",
            ),
        ],
    ));

    fields.extend(with_section(
        "Station Specific",
        vec![
            checkbox(
                "field_Station_Do_RX_Check",
                "Generate Receive Check Statistics?",
                "STATION_DO_RCHECK",
            )
            .on_row(StationRow::RxCheck),
            text(
                "field_Station_Outside_Channel",
                "Outside Sensor Channel:",
                "STATION_OUTSIDE_CHANNEL",
            )
            .with_help("1 - 3")
            .on_row(StationRow::OutsideChannel),
        ],
    ));

    fields
}

pub(super) fn services() -> Vec<FieldSpec> {
    let remote = vec![
        Choice::new("None", "None"),
        Choice::new("FTP", "FTP"),
        Choice::new("SSH", "SSH"),
    ];

    let mut fields = with_section(
        "Services",
        vec![
            checkbox(
                "field_Enable_htmlgend",
                "Enable HTML Generation (htmlgend):",
                "ENABLE_HTMLGEN",
            ),
            checkbox(
                "field_Enable_wvalarmd",
                "Enable Alarms (wvalarmd):",
                "ENABLE_ALARMS",
            ),
            checkbox(
                "field_Enable_wvcwopd",
                "Enable CWOP (wvcwopd):",
                "ENABLE_CWOP",
            ),
            checkbox(
                "field_Enable_wvhttpd",
                "Enable HTTP Services (wvhttpd):",
                "ENABLE_HTTP",
            ),
            FieldSpec::new(
                "field_Export_Remote_Type",
                "Remote File Export:",
                FieldKind::Radio(remote),
                Binding::RemoteExport,
            ),
            checkbox(
                "field_Enable_wvpmond",
                "Enable Process Monitoring (wvpmond):",
                "ENABLE_PROCMON",
            ),
        ],
    );

    fields.extend([
        verbose("wviewd", Verbosity::WVIEWD),
        verbose("htmlgend", Verbosity::HTMLGEND),
        verbose("wvalarmd", Verbosity::WVALARMD),
        verbose("wviewftpd", Verbosity::WVIEWFTPD),
        verbose("wviewsshd", Verbosity::WVIEWSSHD),
        verbose("wvcwopd", Verbosity::WVCWOPD),
        verbose("wvhttpd", Verbosity::WVHTTPD),
    ]);

    fields.extend(with_section(
        "Email Alerts",
        vec![
            checkbox(
                "field_Enable_Email",
                "Email Alerts on Station Failure?",
                "ENABLE_EMAIL_ALERTS",
            ),
            text(
                "field_Email_Address",
                "To Email Address:",
                "EMAIL_ADDRESS",
            ),
            text(
                "field_Email_From_Address",
                "From Email Address:",
                "FROM_EMAIL_ADDRESS",
            ),
            checkbox(
                "field_Send_Test_Email",
                "Send a Test Email?",
                "SEND_TEST_EMAIL",
            ),
        ],
    ));

    fields.extend(
        ["wviewd", "htmlgend", "wvalarmd", "wvcwopd", "wvhttpd"]
            .into_iter()
            .map(|daemon| {
                text(
                    &format!("field_ProcMon_{daemon}"),
                    &format!("{daemon} Timeout (seconds):"),
                    &format!("PROCMON_{daemon}"),
                )
                .with_help("Restart the process when it misses its heartbeat for this long")
                .in_section("Process Monitoring")
            }),
    );

    fields
}

pub(super) fn file_generation() -> Vec<FieldSpec> {
    let mut fields = with_section(
        "Station",
        vec![
            text(
                "field_Generate_Station_Name",
                "Station Name:",
                "HTMLGEN_STATION_NAME",
            ),
            text(
                "field_Generate_Station_City",
                "Station City:",
                "HTMLGEN_STATION_CITY",
            ),
            text(
                "field_Generate_Station_State",
                "Station State or Country:",
                "HTMLGEN_STATION_STATE",
            ),
            checkbox(
                "field_Generate_Station_IF",
                "Show the Station Interface on Pages?",
                "HTMLGEN_STATION_SHOW_IF",
            ),
        ],
    );

    fields.extend(with_section(
        "Paths and Timing",
        vec![
            text(
                "field_Generate_Target",
                "Generated File Target Directory:",
                "HTMLGEN_IMAGE_PATH",
            ),
            text(
                "field_Generate_Source",
                "HTML Template Directory:",
                "HTMLGEN_HTML_PATH",
            ),
            text(
                "field_Generate_Start_Offset",
                "Generation Start Offset (minutes):",
                "HTMLGEN_START_OFFSET",
            ),
            text(
                "field_Generate_Interval",
                "Generation Interval (minutes):",
                "HTMLGEN_GENERATE_INTERVAL",
            ),
        ],
    ));

    fields.extend(with_section(
        "Units",
        vec![
            checkbox(
                "field_Generate_Metric",
                "Use Metric Units?",
                "HTMLGEN_METRIC_UNITS",
            ),
            checkbox(
                "field_Generate_Metric_MM",
                "Use Millimeters for Rain?",
                "HTMLGEN_METRIC_USE_RAIN_MM",
            )
            .with_help("Only applies with metric units; otherwise centimeters are used"),
            select(
                "field_Generate_WindUnits",
                "Wind Units:",
                "HTMLGEN_WIND_UNITS",
                &["mph", "m/s", "knots", "km/h"],
            ),
            checkbox(
                "field_Generate_Dual_Units",
                "Show Dual Units?",
                "HTMLGEN_DUAL_UNITS",
            ),
            checkbox(
                "field_Generate_Extended",
                "Generate Extended Data?",
                "HTMLGEN_EXTENDED_DATA",
            ),
        ],
    ));

    fields.extend(with_section(
        "Pages",
        vec![
            text(
                "field_Generate_Archive_Days",
                "Archive Browser Files to Keep (days):",
                "HTMLGEN_ARCHIVE_BROWSER_FILES_TO_KEEP",
            )
            .with_help("0 keeps every file"),
            text(
                "field_Generate_Moon_Increasing",
                "Moon Phase Waxing Text:",
                "HTMLGEN_MPHASE_INCREASE",
            ),
            text(
                "field_Generate_Moon_Decreasing",
                "Moon Phase Waning Text:",
                "HTMLGEN_MPHASE_DECREASE",
            ),
            text(
                "field_Generate_Moon_Full",
                "Moon Phase Full Text:",
                "HTMLGEN_MPHASE_FULL",
            ),
            text(
                "field_Generate_Radar_URL",
                "Local Radar URL:",
                "HTMLGEN_LOCAL_RADAR_URL",
            ),
            text(
                "field_Generate_Forecast_URL",
                "Local Forecast URL:",
                "HTMLGEN_LOCAL_FORECAST_URL",
            ),
            text(
                "field_Generate_Date_Format",
                "Date Format:",
                "HTMLGEN_DATE_FORMAT",
            )
            .with_help("strftime format, e.g. %m/%d/%Y"),
        ],
    ));

    fields
}

pub(super) fn alarms() -> Vec<FieldSpec> {
    let mut fields = with_section(
        "General",
        vec![
            checkbox(
                "field_Alarms_Metric",
                "Use Metric Units for Thresholds?",
                "ALARMS_STATION_METRIC",
            ),
            checkbox(
                "field_Alarms_Do_Test",
                "Test an Alarm at Startup?",
                "ALARMS_DO_TEST",
            ),
            text(
                "field_Alarms_Do_Test_Number",
                "Alarm Index to Test:",
                "ALARMS_DO_TEST_NUMBER",
            ),
        ],
    );

    for slot in 1..=10 {
        fields.extend(with_section(
            &format!("Alarm {slot}"),
            vec![
                text(
                    &format!("field_Alarms_Type_{slot}"),
                    "Type:",
                    &format!("ALARMS_{slot}_TYPE"),
                )
                .with_help(
                    "0 Barometer, 1 InsideTemp, 2 InsideHumidity, 3 OutsideTemp, 4 WindSpeed, \
                     5 TenMinuteAvgWindSpeed, 6 WindDirection, 7 OutsideHumidity, 8 RainRate, \
                     9 StormRain, 10 DayRain, 11 MonthRain, 12 YearRain, 13 TxBatteryStatus, \
                     14 ConsoleBatteryVoltage, 15 DewPoint, 16 WindChill, 17 HeatIndex, \
                     18 Radiation, 19 UV, 20 ET, 21-23 ExtraTemp1-3, 24-27 SoilTemp1-4, \
                     28-29 LeafTemp1-2, 30-31 ExtraHumid1-2",
                ),
                checkbox(
                    &format!("field_Alarms_Max_{slot}"),
                    "Is This an Upper Bound Alarm?",
                    &format!("ALARMS_{slot}_MAX"),
                ),
                text(
                    &format!("field_Alarms_Threshold_{slot}"),
                    "Threshold:",
                    &format!("ALARMS_{slot}_THRESHOLD"),
                )
                .with_help("Upper/lower bound value (float or integer)"),
                text(
                    &format!("field_Alarms_Abatement_{slot}"),
                    "Abatement (seconds):",
                    &format!("ALARMS_{slot}_ABATEMENT"),
                )
                .with_help("Seconds to suppress alarms after an alarm triggers"),
                text(
                    &format!("field_Alarms_Execute_{slot}"),
                    "Execute:",
                    &format!("ALARMS_{slot}_EXECUTE"),
                )
                .with_help("Full path to the script or binary to run when the alarm triggers"),
            ],
        ));
    }

    fields
}

pub(super) fn calibration() -> Vec<FieldSpec> {
    let mut fields = with_section(
        "Pressure",
        vec![
            FieldSpec::new(
                "field_CAL_MULT_Pressure",
                "Pressure Multiplier:",
                FieldKind::Text,
                Binding::CalibrationPressure(CalibrationTerm::Multiplier),
            ),
            FieldSpec::new(
                "field_CAL_CONST_Pressure",
                "Pressure Constant:",
                FieldKind::Text,
                Binding::CalibrationPressure(CalibrationTerm::Constant),
            ),
        ],
    );

    let sensors = [
        ("InTemp", "INTEMP", "Inside Temperature"),
        ("OutTemp", "OUTTEMP", "Outside Temperature"),
        ("InHumidity", "INHUMIDITY", "Inside Humidity"),
        ("OutHumidity", "OUTHUMIDITY", "Outside Humidity"),
        ("Windspeed", "WINDSPEED", "Wind Speed"),
        ("Windir", "WINDDIR", "Wind Direction"),
        ("Rain", "RAIN", "Rain"),
        ("Rainrate", "RAINRATE", "Rain Rate"),
    ];
    for (field, suffix, label) in sensors {
        fields.extend(with_section(
            label,
            vec![
                text(
                    &format!("field_CAL_MULT_{field}"),
                    &format!("{label} Multiplier:"),
                    &format!("CAL_MULT_{suffix}"),
                ),
                text(
                    &format!("field_CAL_CONST_{field}"),
                    &format!("{label} Constant:"),
                    &format!("CAL_CONST_{suffix}"),
                ),
            ],
        ));
    }

    fields
}

pub(super) fn cwop() -> Vec<FieldSpec> {
    let mut fields = vec![
        text(
            "field_CWOP_CallSign",
            "Call Sign:",
            "CWOP_APRS_CALL_SIGN",
        )
        .with_help("Your CWOP station ID, e.g. CW0101"),
    ];
    for server in 1..=3 {
        fields.push(text(
            &format!("field_CWOP_Server_{server}"),
            &format!("APRS Server {server}:"),
            &format!("CWOP_APRS_SERVER{server}"),
        ));
        fields.push(text(
            &format!("field_CWOP_Port_{server}"),
            &format!("APRS Port {server}:"),
            &format!("CWOP_APRS_PORTNO{server}"),
        ));
    }
    fields.extend([
        text("field_CWOP_Latitude", "Latitude:", "CWOP_LATITUDE")
            .with_help("APRS format DDMM.hhN, e.g. 3216.75N"),
        text("field_CWOP_Longitude", "Longitude:", "CWOP_LONGITUDE")
            .with_help("APRS format DDDMM.hhW, e.g. 08803.00W"),
        checkbox(
            "field_CWOP_Log_Packet",
            "Log the Weather Packet?",
            "CWOP_LOG_WX_PACKET",
        ),
    ]);
    with_section("CWOP", fields)
}

pub(super) fn ftp() -> Vec<FieldSpec> {
    let mut fields = with_section(
        "Server",
        vec![
            text("field_FTP_Hostname", "Hostname:", "FTP_HOST"),
            text("field_FTP_Username", "Username:", "FTP_USERNAME"),
            password("field_FTP_Password", "Password:", "FTP_PASSWD"),
            text(
                "field_FTP_Remote_Dir",
                "Remote Directory:",
                "FTP_REMOTE_DIRECTORY",
            ),
            checkbox(
                "field_FTP_Use_Passive",
                "Use Passive Mode?",
                "FTP_USE_PASSIVE",
            ),
            text(
                "field_FTP_Interval",
                "Transfer Interval (minutes):",
                "FTP_INTERVAL",
            ),
        ],
    );
    fields.extend((1..=10).map(|rule| {
        text(
            &format!("field_FTP_Source_{rule}"),
            &format!("Source {rule}:"),
            &format!("FTP_RULE_{rule}_SOURCE"),
        )
        .with_help("File or wildcard relative to the generated file directory")
        .in_section("Files")
    }));
    fields
}

pub(super) fn ssh() -> Vec<FieldSpec> {
    let mut fields = Vec::with_capacity(30);
    for rule in 1..=5 {
        fields.extend(with_section(
            &format!("Rule {rule}"),
            vec![
                text(
                    &format!("field_SSH_Source_{rule}"),
                    "Source:",
                    &format!("SSH_{rule}_SOURCE"),
                ),
                text(
                    &format!("field_SSH_Interval_{rule}"),
                    "Interval (minutes):",
                    &format!("SSH_{rule}_INTERVAL"),
                ),
                text(
                    &format!("field_SSH_Host_{rule}"),
                    "Host:",
                    &format!("SSH_{rule}_HOST"),
                ),
                text(
                    &format!("field_SSH_Port_{rule}"),
                    "Port:",
                    &format!("SSH_{rule}_PORT"),
                ),
                text(
                    &format!("field_SSH_UserName_{rule}"),
                    "Username:",
                    &format!("SSH_{rule}_USERNAME"),
                ),
                text(
                    &format!("field_SSH_Destination_{rule}"),
                    "Destination:",
                    &format!("SSH_{rule}_DESTINATION"),
                ),
            ],
        ));
    }
    fields
}

pub(super) fn http_services() -> Vec<FieldSpec> {
    vec![
        text(
            "field_HTTP_Wunderground_ID",
            "Station ID:",
            "HTTP_WUSTATIONID",
        )
        .in_section("Weather Underground"),
        password(
            "field_HTTP_Wunderground_Password",
            "Password:",
            "HTTP_WUPASSWD",
        )
        .in_section("Weather Underground"),
        text(
            "field_HTTP_Weatherforyou_ID",
            "Station ID:",
            "HTTP_YOUSTATIONID",
        )
        .in_section("WeatherForYou"),
        password(
            "field_HTTP_Weatherforyou_Password",
            "Password:",
            "HTTP_YOUPASSWD",
        )
        .in_section("WeatherForYou"),
    ]
}

pub(super) fn sql_export() -> Vec<FieldSpec> {
    with_section(
        "Database Server",
        vec![
            text("field_SQL_Hostname", "Hostname:", "STATION_SQLDB_HOST"),
            text("field_SQL_Username", "Username:", "STATION_SQLDB_USERNAME"),
            password("field_SQL_Password", "Password:", "STATION_SQLDB_PASSWORD"),
            text("field_SQL_Database", "Database:", "STATION_SQLDB_DB_NAME"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_list_every_station_label_in_selector() {
        let fields = station();
        let FieldKind::Select(choices) = &fields[0].kind else {
            panic!("station type is a select");
        };
        assert_eq!(choices.len(), StationType::ALL.len());
        assert_eq!(choices[0].value, "Davis Vantage Pro");
    }

    #[test]
    fn should_bind_dtr_checkbox_to_station_dtr_key() {
        let field = station()
            .into_iter()
            .find(|field| field.name == "field_Station_Do_DTR")
            .unwrap();
        assert_eq!(field.binding, Binding::Key("STATION_DTR".to_string()));
        assert!(field.is_checkbox());
    }

    #[test]
    fn should_mark_location_rows() {
        let rows: Vec<_> = station()
            .into_iter()
            .filter(|field| field.row == Some(StationRow::Location))
            .map(|field| field.name)
            .collect();
        assert_eq!(
            rows,
            vec![
                "field_Station_Elevation",
                "field_Station_Latitude",
                "field_Station_Longitude"
            ]
        );
    }

    #[test]
    fn should_number_alarm_slots_from_one_to_ten() {
        let fields = alarms();
        assert_eq!(fields[3].name, "field_Alarms_Type_1");
        assert_eq!(
            fields.last().unwrap().binding,
            Binding::Key("ALARMS_10_EXECUTE".to_string())
        );
    }

    #[test]
    fn should_map_wind_direction_calibration_to_winddir() {
        assert!(calibration().iter().any(|field| {
            field.name == "field_CAL_MULT_Windir"
                && field.binding == Binding::Key("CAL_MULT_WINDDIR".to_string())
        }));
    }

    #[test]
    fn should_map_cwop_ports_to_portno_keys() {
        assert!(cwop().iter().any(|field| {
            field.name == "field_CWOP_Port_2"
                && field.binding == Binding::Key("CWOP_APRS_PORTNO2".to_string())
        }));
    }
}
