pub mod additional_fee;
pub mod attendance;
pub mod class_group;
pub mod class_session;
pub mod family;
pub mod payment;
pub mod reports;
pub mod student;

pub use additional_fee::AdditionalFee;
pub use attendance::Attendance;
pub use class_group::ClassGroup;
pub use class_session::ClassSession;
pub use family::Family;
pub use payment::Payment;
pub use reports::{
    AttendanceEntry, CreditBreakdown, FamilyData, FeeEntry, FeesByMonth, MonthlyFees, PaymentEntry,
    UpcomingClass,
};
pub use student::Student;
