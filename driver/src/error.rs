use kernel::KernelError;

/// Folds backend errors into a kernel error report.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}
