// self
use crate::{obs::CallOutcome, provider::GatewayMethod};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(method: GatewayMethod, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"alipay_oauth_call_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}
