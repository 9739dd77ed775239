//! Consensus Service - drives the node through each delta cycle.

use async_trait::async_trait;
use dl_01_cycle_events::{Phase, PhaseName, PhaseStatus, PhaseSubscription};
use dl_02_delta_builder::{DeltaBuilderApi, ProducerRanking};
use parking_lot::Mutex;
use shared_types::{short_hex, CandidateDelta, ConsensusMessage, DeltaAddress, Hash, PeerId};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{
    ConsensusConfig, ConsensusError, DeltaCache, DeltaElector, DeltaHashProvider, DeltaVoter,
    Result,
};
use crate::ports::inbound::ConsensusApi;
use crate::ports::outbound::{ConsensusGossip, DeltaStore};


/// Dependencies for ConsensusService
pub struct ConsensusDependencies {
    pub builder: Arc<dyn DeltaBuilderApi>,
    pub ranking: Arc<dyn ProducerRanking>,
    pub cache: Arc<DeltaCache>,
    pub hash_provider: Arc<DeltaHashProvider>,
    pub store: Arc<dyn DeltaStore>,
    pub gossip: Arc<dyn ConsensusGossip>,
}

/// This node's role in the round after `previous`.
#[derive(Clone, Debug)]
struct RoundDuty {
    previous: Hash,
    producers: Vec<PeerId>,
    rank: Option<usize>,
    due: bool,
}

/// Consensus Service
pub struct ConsensusService {
    local_peer_id: PeerId,
    config: ConsensusConfig,
    builder: Arc<dyn DeltaBuilderApi>,
    ranking: Arc<dyn ProducerRanking>,
    cache: Arc<DeltaCache>,
    hash_provider: Arc<DeltaHashProvider>,
    store: Arc<dyn DeltaStore>,
    gossip: Arc<dyn ConsensusGossip>,
    voter: DeltaVoter,
    elector: DeltaElector,
    duty: Mutex<Option<RoundDuty>>,
}

impl ConsensusService {
    pub fn new(
        local_peer_id: PeerId,
        config: ConsensusConfig,
        deps: ConsensusDependencies,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            local_peer_id,
            voter: DeltaVoter::new(local_peer_id, config.retained_rounds),
            elector: DeltaElector::new(config.retained_rounds),
            config,
            builder: deps.builder,
            ranking: deps.ranking,
            cache: deps.cache,
            hash_provider: deps.hash_provider,
            store: deps.store,
            gossip: deps.gossip,
            duty: Mutex::new(None),
        })
    }

    pub fn local_peer_id(&self) -> PeerId {
        self.local_peer_id
    }

    pub fn voter(&self) -> &DeltaVoter {
        &self.voter
    }

    pub fn elector(&self) -> &DeltaElector {
        &self.elector
    }

    pub fn hash_provider(&self) -> &Arc<DeltaHashProvider> {
        &self.hash_provider
    }

    /// Consume phase events until the stream ends or fails.
    pub async fn run(self: Arc<Self>, mut phases: PhaseSubscription) {
        while let Some(event) = phases.recv().await {
            match event {
                Ok(phase) => {
                    if let Err(e) = self.handle_phase(&phase).await {
                        warn!(
                            phase = %phase.name,
                            status = %phase.status,
                            previous = %short_hex(&phase.previous_delta_hash),
                            error = %e,
                            "Phase handling failed"
                        );
                    }
                }
                Err(e) => {
                    error!(error = %e, "Phase stream failed, consensus stopping");
                    break;
                }
            }
        }
        info!("Consensus loop stopped");
    }

    fn duty_for(&self, previous: &Hash) -> RoundDuty {
        if let Some(duty) = self.duty.lock().as_ref().filter(|d| d.previous == *previous) {
            return duty.clone();
        }
        let producers = self.ranking.get_producers(previous);
        let rank = producers.iter().position(|p| *p == self.local_peer_id);
        let due = rank.is_some_and(|r| r < self.config.max_producers_per_cycle);
        let duty = RoundDuty {
            previous: *previous,
            producers,
            rank,
            due,
        };
        *self.duty.lock() = Some(duty.clone());
        duty
    }

    fn on_construction(&self, previous: &Hash) {
        let duty = self.duty_for(previous);
        debug!(
            previous = %short_hex(previous),
            producers = duty.producers.len(),
            rank = ?duty.rank,
            due = duty.due,
            "Producer duty decided"
        );
    }

    async fn on_campaigning(&self, previous: &Hash) -> Result<()> {
        let duty = self.duty_for(previous);
        if !duty.due {
            debug!(previous = %short_hex(previous), rank = ?duty.rank, "Not this node's turn to produce");
            return Ok(());
        }

        let candidate = self.builder.build_candidate_delta(*previous).await?;
        info!(
            candidate = %short_hex(&candidate.hash),
            previous = %short_hex(previous),
            "Broadcasting candidate delta"
        );
        self.voter.on_candidate(candidate, &duty.producers);
        self.gossip
            .broadcast(ConsensusMessage::Candidate(candidate))
            .await;
        Ok(())
    }

    async fn on_voting(&self, previous: &Hash) {
        let duty = self.duty_for(previous);
        let Some(favourite) = self.voter.favourite_delta(previous) else {
            debug!(previous = %short_hex(previous), "No candidate to vote for");
            return;
        };
        debug!(
            favourite = %short_hex(&favourite.candidate.hash),
            previous = %short_hex(previous),
            "Voting for favourite candidate"
        );
        self.elector.on_favourite(favourite, &duty.producers);
        self.gossip
            .broadcast(ConsensusMessage::Favourite(favourite))
            .await;
    }

    async fn on_synchronisation(&self, previous: &Hash) -> Result<()> {
        let duty = self.duty_for(previous);
        let Some(elected) = self
            .elector
            .most_popular_candidate(previous, duty.producers.len())
        else {
            info!(previous = %short_hex(previous), "No delta elected this round");
            return Ok(());
        };
        if elected.producer_id != self.local_peer_id {
            debug!(
                elected = %short_hex(&elected.hash),
                producer = %elected.producer_id,
                "Elected delta produced elsewhere, awaiting its address"
            );
            return Ok(());
        }
        self.publish_elected(&elected).await
    }

    async fn publish_elected(&self, elected: &CandidateDelta) -> Result<()> {
        let delta = self
            .cache
            .local_delta(&elected.hash)
            .ok_or_else(|| ConsensusError::DeltaNotFound(short_hex(&elected.hash)))?;
        let address = self
            .store
            .publish(&delta)
            .await
            .map_err(ConsensusError::Store)?;
        if address != delta.hash() {
            return Err(ConsensusError::AddressMismatch(short_hex(&address)));
        }

        let previous = delta.previous_delta_hash;
        self.cache.add_confirmed_delta(address, delta);
        info!(
            address = %short_hex(&address),
            previous = %short_hex(&previous),
            "New delta published"
        );
        self.gossip
            .broadcast(ConsensusMessage::DeltaAddress(DeltaAddress {
                delta_hash: address,
                previous_delta_hash: previous,
            }))
            .await;
        self.hash_provider.try_update_latest_hash(&previous, &address)
    }

    async fn accept_address(&self, address: DeltaAddress) -> Result<()> {
        if self.hash_provider.is_accepted(&address.delta_hash) {
            return Ok(());
        }
        if self.cache.confirmed_delta(&address.delta_hash).is_none() {
            let delta = self
                .store
                .fetch(&address.delta_hash)
                .await
                .map_err(ConsensusError::Store)?
                .ok_or_else(|| ConsensusError::DeltaNotFound(short_hex(&address.delta_hash)))?;
            if delta.hash() != address.delta_hash {
                return Err(ConsensusError::AddressMismatch(short_hex(
                    &address.delta_hash,
                )));
            }
            self.cache.add_confirmed_delta(address.delta_hash, delta);
        }
        self.hash_provider
            .try_update_latest_hash(&address.previous_delta_hash, &address.delta_hash)
    }
}

#[async_trait]
impl ConsensusApi for ConsensusService {
    async fn handle_phase(&self, phase: &Phase) -> Result<()> {
        if phase.status != PhaseStatus::Producing {
            return Ok(());
        }
        let previous = &phase.previous_delta_hash;
        match phase.name {
            PhaseName::Construction => {
                self.on_construction(previous);
                Ok(())
            }
            PhaseName::Campaigning => self.on_campaigning(previous).await,
            PhaseName::Voting => {
                self.on_voting(previous).await;
                Ok(())
            }
            PhaseName::Synchronisation => self.on_synchronisation(previous).await,
        }
    }

    async fn handle_message(&self, message: ConsensusMessage) -> Result<()> {
        match message {
            ConsensusMessage::Candidate(candidate) => {
                let producers = self.ranking.get_producers(&candidate.previous_delta_hash);
                self.voter.on_candidate(candidate, &producers);
                Ok(())
            }
            ConsensusMessage::Favourite(favourite) => {
                let producers = self
                    .ranking
                    .get_producers(&favourite.candidate.previous_delta_hash);
                self.elector.on_favourite(favourite, &producers);
                Ok(())
            }
            ConsensusMessage::DeltaAddress(address) => self.accept_address(address).await,
        }
    }
}
