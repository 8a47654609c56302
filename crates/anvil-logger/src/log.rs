use crate::severity::LogSeverity;
use crate::time::now;

pub fn log(msg: String, log_severity: LogSeverity) {
    println!("[{}] {} {}", log_severity, now(), msg);
}
